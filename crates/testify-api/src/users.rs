use axum::{Json, extract::State};

use testify_types::api::UserResponse;

use crate::error::ApiError;
use crate::extract::ApiPath;
use crate::state::AppState;
use crate::testimonies::required;

/// GET /users/{user_id}: lookup by id or address; a first lookup creates
/// the default profile.
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let key = required(Some(user_id), "userId")?;
    let user = state.store.get_or_create_user(&key)?;
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}
