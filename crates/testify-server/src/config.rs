use std::net::SocketAddr;

use anyhow::Context;

use testify_clients::blob::DEFAULT_BLOB_API;
use testify_clients::explorer::DEFAULT_BASESCAN_API;
use testify_clients::images::DEFAULT_OPENAI_API;
use testify_clients::speech::DEFAULT_ELEVENLABS_API;

/// Runtime configuration, read from the environment (and `.env`).
///
/// Vendor credentials are optional: a missing one disables the endpoint that
/// needs it instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_api_url: String,
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_api_url: String,
    pub blob_token: Option<String>,
    pub blob_api_url: String,
    pub basescan_api_key: Option<String>,
    pub basescan_api_url: String,
    pub mint_relay_url: Option<String>,
    pub mint_relay_key: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        // Blank values count as unset
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("TESTIFY_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("TESTIFY_PORT is not a valid port: {}", raw))?,
            None => 3000,
        };

        Ok(Self {
            host: var("TESTIFY_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            openai_api_key: var("OPENAI_API_KEY"),
            openai_api_url: var("OPENAI_API_URL").unwrap_or_else(|| DEFAULT_OPENAI_API.into()),
            elevenlabs_api_key: var("ELEVENLABS_API_KEY"),
            elevenlabs_api_url: var("ELEVENLABS_API_URL")
                .unwrap_or_else(|| DEFAULT_ELEVENLABS_API.into()),
            blob_token: var("BLOB_READ_WRITE_TOKEN"),
            blob_api_url: var("BLOB_API_URL").unwrap_or_else(|| DEFAULT_BLOB_API.into()),
            basescan_api_key: var("BASESCAN_API_KEY"),
            basescan_api_url: var("BASESCAN_API_URL")
                .unwrap_or_else(|| DEFAULT_BASESCAN_API.into()),
            mint_relay_url: var("MINT_RELAY_URL"),
            mint_relay_key: var("MINT_RELAY_KEY"),
        })
    }

    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
