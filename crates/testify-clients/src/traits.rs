use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;

use crate::ClientError;

/// Audio bytes as they arrive from the speech API.
pub type AudioStream = BoxStream<'static, Result<Bytes, ClientError>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: Option<u8>,
    pub total_supply: Option<String>,
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub tx_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Temporary URL where the generator serves the result.
    pub url: String,
    pub revised_prompt: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FetchedObject {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// Block-explorer lookups for token contracts.
#[async_trait]
pub trait TokenExplorer: Send + Sync {
    /// `Ok(None)` when the explorer knows nothing about the address.
    async fn token_metadata(&self, address: &str) -> Result<Option<TokenMetadata>, ClientError>;

    /// Whether the contract source is verified on the explorer.
    async fn is_verified(&self, address: &str) -> Result<bool, ClientError>;
}

/// Mints creator coins as rewards.
#[async_trait]
pub trait CoinMinter: Send + Sync {
    async fn mint(&self, recipient: &str, amount: &str) -> Result<MintReceipt, ClientError>;
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ClientError>;
}

/// Downloads a remote object into memory.
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedObject, ClientError>;
}

/// Public object storage. Returns the public URL of the stored object.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, pathname: &str, data: Bytes, content_type: &str)
    -> Result<String, ClientError>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<AudioStream, ClientError>;
}
