use async_trait::async_trait;
use reqwest::{Client, header};

use crate::{ClientError, FetchedObject, REQUEST_TIMEOUT, RemoteFetcher, status_error};

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedObject, ClientError> {
        let response = self.client.get(url).timeout(REQUEST_TIMEOUT).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;

        Ok(FetchedObject {
            bytes,
            content_type,
        })
    }
}
