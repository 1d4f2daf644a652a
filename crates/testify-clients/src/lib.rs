//! Outbound integrations.
//!
//! Each external service sits behind a trait in [`traits`] so handlers can be
//! driven by the HTTP implementations in production and by [`mock`] in tests.
//! No client retries; a failed call is reported once and left to the caller.

pub mod blob;
pub mod explorer;
pub mod fetch;
pub mod images;
pub mod minter;
pub mod mock;
pub mod speech;
pub mod traits;

use std::time::Duration;

use reqwest::{Client, Response};

pub use traits::*;

/// Whole-request timeout for calls whose response is buffered.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest gap between two reads. Streamed responses are bounded by this
/// alone, so long audio is never cut off mid-body.
pub const READ_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure or undecodable body
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Upstream answered 2xx but the payload said no
    #[error("Upstream rejected request: {0}")]
    Rejected(String),

    /// Payload did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Shared HTTP client for all integrations. Buffered calls add
/// [`REQUEST_TIMEOUT`] per request.
pub fn build_http_client() -> Result<Client, ClientError> {
    Ok(Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .read_timeout(READ_TIMEOUT)
        .build()?)
}

/// Turn a non-success response into [`ClientError::Status`], keeping the body.
pub(crate) async fn status_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ClientError::Status { status, body }
}
