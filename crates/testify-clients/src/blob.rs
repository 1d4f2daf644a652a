//! Vercel Blob storage.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, header};
use serde::Deserialize;
use tracing::info;

use crate::{BlobStore, ClientError, REQUEST_TIMEOUT, status_error};

pub const DEFAULT_BLOB_API: &str = "https://blob.vercel-storage.com";
const BLOB_API_VERSION: &str = "7";

pub struct VercelBlobStore {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    url: String,
}

impl VercelBlobStore {
    pub fn new(client: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn object_url(&self, pathname: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            pathname.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl BlobStore for VercelBlobStore {
    async fn put(
        &self,
        pathname: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, ClientError> {
        let size = data.len();
        let response = self
            .client
            .put(self.object_url(pathname))
            .timeout(REQUEST_TIMEOUT)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header("x-api-version", BLOB_API_VERSION)
            .header("x-content-type", content_type)
            .header("x-add-random-suffix", "1")
            .body(data)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let stored: PutResponse = response.json().await?;
        info!("Stored {} ({} bytes) at {}", pathname, size, stored.url);
        Ok(stored.url)
    }
}
