//! Basescan (Etherscan-compatible) explorer client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{ClientError, REQUEST_TIMEOUT, TokenExplorer, TokenMetadata, status_error};

pub const DEFAULT_BASESCAN_API: &str = "https://api.basescan.org/api";
const NO_DATA: &str = "No data found";

pub struct BasescanExplorer {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

/// Etherscan-style envelope: `status` is "1" on success, and `result` is
/// either the payload or an error string.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    message: String,
    #[serde(default)]
    result: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenInfoRow {
    #[serde(default)]
    token_name: String,
    #[serde(default)]
    symbol: String,
    divisor: Option<String>,
    total_supply: Option<String>,
    token_type: Option<String>,
}

impl BasescanExplorer {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    async fn query(&self, module: &str, action: &str, address: &str) -> Result<Envelope, ClientError> {
        let mut params = vec![
            ("module", module),
            ("action", action),
            ("contractaddress", address),
            ("address", address),
        ];
        if let Some(key) = self.api_key.as_deref() {
            params.push(("apikey", key));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(response.json::<Envelope>().await?)
    }
}

#[async_trait]
impl TokenExplorer for BasescanExplorer {
    async fn token_metadata(&self, address: &str) -> Result<Option<TokenMetadata>, ClientError> {
        let envelope = self.query("token", "tokeninfo", address).await?;
        debug!("tokeninfo for {}: status={} message={}", address, envelope.status, envelope.message);
        parse_token_info(envelope)
    }

    async fn is_verified(&self, address: &str) -> Result<bool, ClientError> {
        let envelope = self.query("contract", "getsourcecode", address).await?;
        Ok(parse_verified(&envelope))
    }
}

fn parse_token_info(envelope: Envelope) -> Result<Option<TokenMetadata>, ClientError> {
    if envelope.status != "1" {
        let detail = envelope.result.as_str().unwrap_or(envelope.message.as_str());
        if envelope.message == NO_DATA || detail.contains(NO_DATA) {
            return Ok(None);
        }
        return Err(ClientError::Rejected(detail.to_string()));
    }

    let Some(first) = envelope.result.as_array().and_then(|rows| rows.first()) else {
        return Ok(None);
    };
    let row: TokenInfoRow =
        serde_json::from_value(first.clone()).map_err(|e| ClientError::Parse(e.to_string()))?;

    if row.token_name.is_empty() && row.symbol.is_empty() {
        return Ok(None);
    }

    Ok(Some(TokenMetadata {
        name: row.token_name,
        symbol: row.symbol,
        decimals: row.divisor.and_then(|d| d.parse().ok()),
        total_supply: row.total_supply,
        token_type: row.token_type,
    }))
}

fn parse_verified(envelope: &Envelope) -> bool {
    envelope.status == "1"
        && envelope
            .result
            .as_array()
            .and_then(|rows| rows.first())
            .and_then(|row| row.get("SourceCode"))
            .and_then(Value::as_str)
            .is_some_and(|src| !src.is_empty())
}
