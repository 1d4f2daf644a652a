use axum::{Json, extract::State};
use tracing::warn;

use testify_types::api::{TokenInfo, TokenResponse};

use crate::error::ApiError;
use crate::extract::ApiPath;
use crate::state::AppState;

const EXPLORER_TOKEN_URL: &str = "https://basescan.org/token";

/// `0x` followed by exactly 40 hex digits.
pub fn is_valid_address(address: &str) -> bool {
    address.len() == 42
        && address
            .strip_prefix("0x")
            .is_some_and(|digits| hex::decode(digits).is_ok())
}

/// GET /token/{address}
pub async fn get_token(
    State(state): State<AppState>,
    ApiPath(address): ApiPath<String>,
) -> Result<Json<TokenResponse>, ApiError> {
    if !is_valid_address(&address) {
        return Err(ApiError::Validation("Invalid token address".into()));
    }

    let explorer = &state.integrations.explorer;
    let metadata = explorer
        .token_metadata(&address)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch token info", e))?
        .ok_or_else(|| ApiError::NotFound("Token not found".into()))?;

    let verified = explorer.is_verified(&address).await.unwrap_or_else(|e| {
        warn!("Verification lookup for {} failed: {}", address, e);
        false
    });

    Ok(Json(TokenResponse {
        success: true,
        token: TokenInfo {
            basescan_url: format!("{}/{}", EXPLORER_TOKEN_URL, address),
            address,
            name: metadata.name,
            symbol: metadata.symbol,
            decimals: metadata.decimals,
            total_supply: metadata.total_supply,
            token_type: metadata.token_type,
            verified,
        },
    }))
}
