use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use testify_clients::ClientError;
use testify_types::api::ErrorBody;

/// Handler-boundary error. Every variant renders as the JSON error envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// An integration was never configured (missing credential)
    #[error("{0}")]
    NotConfigured(String),

    /// An external call failed
    #[error("{message}")]
    Upstream {
        message: String,
        #[source]
        source: ClientError,
    },

    /// An external call failed and its status should reach the caller as-is
    #[error("{message}")]
    UpstreamStatus {
        message: String,
        status: u16,
        body: String,
    },

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn upstream(message: impl Into<String>, source: ClientError) -> Self {
        Self::Upstream {
            message: message.into(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UpstreamStatus { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = match &self {
            ApiError::Upstream { source, .. } => {
                warn!("{}: {}", self, source);
                Some(source.to_string())
            }
            ApiError::UpstreamStatus { body, status, .. } => {
                warn!("{}: upstream status {}", self, status);
                Some(body.clone())
            }
            ApiError::Internal(e) => {
                error!("Internal error: {:#}", e);
                None
            }
            _ => None,
        };

        let body = ErrorBody {
            success: false,
            error: self.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::NotConfigured("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::upstream("x", ClientError::Parse("bad".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::UpstreamStatus {
                message: "x".into(),
                status: 429,
                body: String::new()
            }
            .status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::UpstreamStatus {
                message: "x".into(),
                status: 42,
                body: String::new()
            }
            .status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
