use axum::{
    Json,
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::info;

use testify_clients::ClientError;
use testify_types::api::{GenerateImageRequest, GenerateImageResponse, SpeechRequest};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;
use crate::testimonies::required;

const DEFAULT_IMAGE_TYPE: &str = "image/png";

/// POST /generate-image: generate, download, and re-host on blob storage.
pub async fn generate_image(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    let prompt = required(req.prompt, "prompt")?;

    let images = state
        .integrations
        .images
        .as_ref()
        .ok_or_else(|| ApiError::NotConfigured("OpenAI API key not configured".into()))?;
    let blobs = state
        .integrations
        .blobs
        .as_ref()
        .ok_or_else(|| ApiError::NotConfigured("Blob storage token not configured".into()))?;

    let generated = images
        .generate(&prompt)
        .await
        .map_err(|e| ApiError::upstream("Failed to generate image", e))?;

    let fetched = state
        .integrations
        .fetcher
        .fetch(&generated.url)
        .await
        .map_err(|e| ApiError::upstream("Failed to download generated image", e))?;

    let content_type = fetched
        .content_type
        .as_deref()
        .unwrap_or(DEFAULT_IMAGE_TYPE)
        .to_string();
    let pathname = format!("generated/{}.png", Utc::now().timestamp_millis());

    let image_url = blobs
        .put(&pathname, fetched.bytes, &content_type)
        .await
        .map_err(|e| ApiError::upstream("Failed to store generated image", e))?;

    info!("Generated image re-hosted at {}", image_url);

    Ok(Json(GenerateImageResponse {
        success: true,
        image_url,
        original_prompt: prompt,
        revised_prompt: generated.revised_prompt,
    }))
}

/// POST /tts: audio streams straight through; upstream error statuses are
/// relayed with their body.
pub async fn text_to_speech(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SpeechRequest>,
) -> Result<Response, ApiError> {
    let text = required(req.text, "text")?;

    let speech = state
        .integrations
        .speech
        .as_ref()
        .ok_or_else(|| ApiError::NotConfigured("ElevenLabs API key not configured".into()))?;

    let audio = speech.synthesize(&text).await.map_err(|e| match e {
        ClientError::Status { status, body } => ApiError::UpstreamStatus {
            message: "Failed to generate speech".into(),
            status,
            body,
        },
        other => ApiError::upstream("Failed to generate speech", other),
    })?;

    Ok((
        [(header::CONTENT_TYPE, "audio/mpeg")],
        Body::from_stream(audio),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode, header};
    use serde_json::json;
    use testify_clients::mock::{MockImageGenerator, MockSpeech};

    use crate::test_support::{call, call_bytes, harness, harness_with};

    #[tokio::test]
    async fn image_is_rehosted() {
        let h = harness();
        let (status, body) = call(
            h.app(),
            Method::POST,
            "/generate-image",
            Some(json!({"prompt": "a lighthouse at dawn"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["originalPrompt"], "a lighthouse at dawn");
        assert_eq!(body["revisedPrompt"], "revised");
        assert!(body["imageUrl"].as_str().unwrap().starts_with("https://blob.mock/generated/"));

        let objects = h.blobs.objects();
        assert_eq!(objects.len(), 1);
        assert_eq!(&objects[0].1[..], b"PNGDATA");
        assert_eq!(objects[0].2, "image/png");
    }

    #[tokio::test]
    async fn image_requires_prompt() {
        let h = harness();
        let (status, _) = call(h.app(), Method::POST, "/generate-image", Some(json!({"prompt": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = call(h.app(), Method::POST, "/generate-image", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(h.blobs.objects().is_empty());
    }

    #[tokio::test]
    async fn image_without_credential_fails() {
        let h = harness_with(|i| i.images = None);
        let (status, body) =
            call(h.app(), Method::POST, "/generate-image", Some(json!({"prompt": "x"}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "OpenAI API key not configured");
    }

    #[tokio::test]
    async fn image_upstream_failure_carries_details() {
        let h = harness_with(|i| {
            i.images = Some(Arc::new(
                MockImageGenerator::new("https://x").with_available(false),
            ))
        });
        let (status, body) =
            call(h.app(), Method::POST, "/generate-image", Some(json!({"prompt": "x"}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to generate image");
        assert!(body["details"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn speech_streams_audio() {
        let h = harness();
        let (status, headers, bytes) =
            call_bytes(h.app(), Method::POST, "/tts", Some(json!({"text": "hello"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "audio/mpeg");
        assert_eq!(&bytes[..], b"ID3AUDIO");
    }

    #[tokio::test]
    async fn speech_relays_upstream_status() {
        let h = harness_with(|i| {
            i.speech = Some(Arc::new(MockSpeech::failing(401, "{\"detail\":\"invalid key\"}")))
        });
        let (status, body) = call(h.app(), Method::POST, "/tts", Some(json!({"text": "hello"}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Failed to generate speech");
        assert_eq!(body["details"], "{\"detail\":\"invalid key\"}");
    }

    #[tokio::test]
    async fn speech_validates_and_requires_credential() {
        let h = harness();
        let (status, _) = call(h.app(), Method::POST, "/tts", Some(json!({"text": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let h = harness_with(|i| i.speech = None);
        let (status, body) = call(h.app(), Method::POST, "/tts", Some(json!({"text": "hi"}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "ElevenLabs API key not configured");
    }
}
