//! Coin minting through an HTTP relay.
//!
//! The relay owns the signing key and the coin SDK; this side only asks it to
//! mint `amount` to `recipient` and reads back the transaction hash.

use async_trait::async_trait;
use reqwest::{Client, header};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ClientError, CoinMinter, MintReceipt, REQUEST_TIMEOUT, status_error};

pub struct RelayMinter {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct MintRequest<'a> {
    recipient: &'a str,
    amount: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MintResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(alias = "hash")]
    tx_hash: Option<String>,
    error: Option<String>,
}

impl RelayMinter {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    fn mint_url(&self) -> String {
        format!("{}/mint", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CoinMinter for RelayMinter {
    async fn mint(&self, recipient: &str, amount: &str) -> Result<MintReceipt, ClientError> {
        let mut request = self
            .client
            .post(self.mint_url())
            .timeout(REQUEST_TIMEOUT)
            .json(&MintRequest { recipient, amount });
        if let Some(key) = &self.api_key {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", key));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let receipt = into_receipt(response.json().await?)?;
        info!("Minted {} to {}: {}", amount, recipient, receipt.tx_hash);
        Ok(receipt)
    }
}

fn into_receipt(body: MintResponse) -> Result<MintReceipt, ClientError> {
    if body.success == Some(false) {
        return Err(ClientError::Rejected(
            body.error.unwrap_or_else(|| "mint failed".into()),
        ));
    }
    body.tx_hash
        .map(|tx_hash| MintReceipt { tx_hash })
        .ok_or_else(|| ClientError::Parse("mint response carried no transaction hash".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<MintReceipt, ClientError> {
        into_receipt(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn reads_tx_hash_or_hash() {
        assert_eq!(parse(r#"{"txHash":"0xaa"}"#).unwrap().tx_hash, "0xaa");
        assert_eq!(parse(r#"{"success":true,"hash":"0xbb"}"#).unwrap().tx_hash, "0xbb");
    }

    #[test]
    fn explicit_failure_is_rejected() {
        let err = parse(r#"{"success":false,"error":"insufficient balance"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Rejected(ref m) if m == "insufficient balance"));
    }

    #[test]
    fn missing_hash_is_parse_error() {
        assert!(matches!(parse("{}"), Err(ClientError::Parse(_))));
    }
}
