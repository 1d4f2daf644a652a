use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::{info, warn};

use testify_store::testimonies::NewTestimony;
use testify_types::api::{
    AddCommentRequest, CommentResponse, CreateTestimonyRequest, CreateTestimonyResponse,
    TestimonyListResponse, ToggleLikeRequest, ToggleLikeResponse,
};
use testify_types::models::Category;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Reward announced for sharing a testimony. Logged only, never transferred.
pub const CREATE_REWARD: &str = "5";

/// Coins minted to the author for each new like.
pub const LIKE_REWARD: &str = "1";

/// Trimmed value of a required field, or a validation error naming it.
pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::Validation(format!("Missing required field: {}", field)))
}

/// POST /testimony/create
pub async fn create_testimony(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateTestimonyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let address = required(req.address, "address")?;
    let title = required(req.title, "title")?;
    let content = required(req.content, "content")?;
    let category = required(req.category, "category")?
        .parse::<Category>()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let tags = req
        .tags
        .unwrap_or_default()
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let testimony = state.store.create_testimony(NewTestimony {
        author: address,
        title,
        content,
        category,
        tags,
    })?;

    info!(
        "Testimony {} created by {}; reward of {} recorded (no transfer)",
        testimony.id, testimony.author, CREATE_REWARD
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateTestimonyResponse {
            success: true,
            testimony,
            reward: CREATE_REWARD.to_string(),
            message: format!("Testimony shared! You earned {} tokens.", CREATE_REWARD),
        }),
    ))
}

/// GET /testimony
pub async fn list_testimonies(
    State(state): State<AppState>,
) -> Result<Json<TestimonyListResponse>, ApiError> {
    let testimonies = state.store.list_testimonies()?;
    Ok(Json(TestimonyListResponse {
        success: true,
        testimonies,
    }))
}

/// POST /testimony/like
///
/// The like commits before the reward mint is attempted; a failed mint is
/// logged and reported by the absence of `txHash`.
pub async fn toggle_like(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ToggleLikeRequest>,
) -> Result<Json<ToggleLikeResponse>, ApiError> {
    let testimony_id = required(req.testimony_id, "testimonyId")?;
    let address = required(req.address, "address")?;

    let toggle = state
        .store
        .toggle_like(&testimony_id, &address)?
        .ok_or_else(|| ApiError::NotFound("Testimony not found".into()))?;

    let minter = state.integrations.minter.as_ref();
    let mut tx_hash = None;

    if toggle.liked {
        if let Some(minter) = minter {
            match minter.mint(&toggle.author, LIKE_REWARD).await {
                Ok(receipt) => tx_hash = Some(receipt.tx_hash),
                Err(e) => warn!(
                    "Like reward mint to {} for testimony {} failed: {}",
                    toggle.author, testimony_id, e
                ),
            }
        }
    }

    Ok(Json(ToggleLikeResponse {
        success: true,
        likes: toggle.likes,
        liked: toggle.liked,
        tx_hash,
        minting_enabled: minter.is_some(),
    }))
}

/// POST /testimony/comment
pub async fn add_comment(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AddCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let testimony_id = required(req.testimony_id, "testimonyId")?;
    let address = required(req.address, "address")?;
    let content = required(req.content, "content")?;

    let comment = state
        .store
        .add_comment(&testimony_id, &address, &content)?
        .ok_or_else(|| ApiError::NotFound("Testimony not found".into()))?;

    Ok((
        StatusCode::CREATED,
        Json(CommentResponse {
            success: true,
            comment,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};
    use serde_json::{Value, json};
    use testify_clients::mock::MockMinter;

    use crate::test_support::{call, harness, harness_with};

    async fn create(app: axum::Router, body: Value) -> (StatusCode, Value) {
        call(app, Method::POST, "/testimony/create", Some(body)).await
    }

    #[tokio::test]
    async fn create_returns_record_and_reward() {
        let h = harness();
        let (status, body) = create(
            h.app(),
            json!({"address": "0xabc", "title": "T", "content": "C", "category": "Healing"}),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["reward"], "5");
        assert_eq!(body["testimony"]["likes"], json!([]));
        assert_eq!(body["testimony"]["tags"], json!([]));
        assert_eq!(body["testimony"]["author"], "0xabc");
        assert_eq!(body["testimony"]["category"], "Healing");
    }

    #[tokio::test]
    async fn create_with_missing_field_appends_nothing() {
        let h = harness();
        let bodies = [
            json!({"title": "T", "content": "C", "category": "Healing"}),
            json!({"address": "0xabc", "content": "C", "category": "Healing"}),
            json!({"address": "0xabc", "title": "T", "category": "Healing"}),
            json!({"address": "0xabc", "title": "T", "content": "C"}),
            json!({"address": "0xabc", "title": "   ", "content": "C", "category": "Healing"}),
            json!({"address": "0xabc", "title": "T", "content": "C", "category": "Gossip"}),
        ];

        for body in bodies {
            let (status, resp) = create(h.app(), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(resp["success"], false);
            assert!(resp["error"].is_string());
        }
        assert_eq!(h.state.store.testimony_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let h = harness();
        let (status, body) = crate::test_support::call_text(
            h.app(),
            Method::POST,
            "/testimony/create",
            "{not json",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let h = harness();
        for title in ["one", "two", "three"] {
            create(
                h.app(),
                json!({"address": "0xabc", "title": title, "content": "C", "category": "Faith", "tags": ["a", " "]}),
            )
            .await;
        }

        let (status, body) = call(h.app(), Method::GET, "/testimony", None).await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = body["testimonies"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["three", "two", "one"]);
        assert_eq!(body["testimonies"][0]["tags"], json!(["a"]));
    }

    #[tokio::test]
    async fn like_then_unlike_mints_once() {
        let h = harness();
        let (_, created) = create(
            h.app(),
            json!({"address": "0xauthor", "title": "T", "content": "C", "category": "Healing"}),
        )
        .await;
        let id = created["testimony"]["id"].as_str().unwrap().to_string();
        let like = json!({"testimonyId": id, "address": "0xfan"});

        let (status, first) = call(h.app(), Method::POST, "/testimony/like", Some(like.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["liked"], true);
        assert_eq!(first["likes"], 1);
        assert_eq!(first["mintingEnabled"], true);
        assert!(first["txHash"].as_str().unwrap().starts_with("0x"));
        assert_eq!(h.minter.mints(), vec![("0xauthor".to_string(), "1".to_string())]);

        let (_, second) = call(h.app(), Method::POST, "/testimony/like", Some(like)).await;
        assert_eq!(second["liked"], false);
        assert_eq!(second["likes"], 0);
        assert!(second.get("txHash").is_none());
        assert_eq!(h.minter.call_count(), 1);
    }

    #[tokio::test]
    async fn failed_mint_keeps_like() {
        let minter = Arc::new(MockMinter::new().with_available(false));
        let m = minter.clone();
        let h = harness_with(move |i| i.minter = Some(m));

        let (_, created) = create(
            h.app(),
            json!({"address": "0xauthor", "title": "T", "content": "C", "category": "Healing"}),
        )
        .await;
        let id = created["testimony"]["id"].as_str().unwrap().to_string();

        let (status, body) = call(
            h.app(),
            Method::POST,
            "/testimony/like",
            Some(json!({"testimonyId": id, "address": "0xfan"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["liked"], true);
        assert!(body.get("txHash").is_none());
        assert_eq!(minter.call_count(), 1);

        let stored = h.state.store.get_testimony(&id).unwrap().unwrap();
        assert_eq!(stored.likes, vec!["0xfan".to_string()]);
    }

    #[tokio::test]
    async fn like_without_minter_reports_disabled() {
        let h = harness_with(|i| i.minter = None);
        let (_, created) = create(
            h.app(),
            json!({"address": "0xauthor", "title": "T", "content": "C", "category": "Other"}),
        )
        .await;
        let id = created["testimony"]["id"].as_str().unwrap().to_string();

        let (_, body) = call(
            h.app(),
            Method::POST,
            "/testimony/like",
            Some(json!({"testimonyId": id, "address": "0xfan"})),
        )
        .await;
        assert_eq!(body["liked"], true);
        assert_eq!(body["mintingEnabled"], false);
    }

    #[tokio::test]
    async fn like_unknown_testimony_is_not_found() {
        let h = harness();
        let (status, body) = call(
            h.app(),
            Method::POST,
            "/testimony/like",
            Some(json!({"testimonyId": "nope", "address": "0xfan"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Testimony not found");
        assert_eq!(h.minter.call_count(), 0);
    }

    #[tokio::test]
    async fn comment_round_trip() {
        let h = harness();
        let (_, created) = create(
            h.app(),
            json!({"address": "0xauthor", "title": "T", "content": "C", "category": "Faith"}),
        )
        .await;
        let id = created["testimony"]["id"].as_str().unwrap().to_string();

        let (status, body) = call(
            h.app(),
            Method::POST,
            "/testimony/comment",
            Some(json!({"testimonyId": id, "address": "0xfan", "content": "Amen"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["comment"]["content"], "Amen");

        let (status, _) = call(
            h.app(),
            Method::POST,
            "/testimony/comment",
            Some(json!({"testimonyId": id, "address": "0xfan"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(
            h.app(),
            Method::POST,
            "/testimony/comment",
            Some(json!({"testimonyId": "nope", "address": "0xfan", "content": "Hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
