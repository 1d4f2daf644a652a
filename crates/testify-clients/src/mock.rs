//! In-memory stand-ins for every integration, for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream;

use crate::{
    AudioStream, BlobStore, ClientError, CoinMinter, FetchedObject, GeneratedImage,
    ImageGenerator, MintReceipt, RemoteFetcher, SpeechSynthesizer, TokenExplorer, TokenMetadata,
};

fn unavailable(what: &str) -> ClientError {
    ClientError::Status {
        status: 503,
        body: format!("mock {what} disabled"),
    }
}

// -- Explorer --

#[derive(Default)]
pub struct MockExplorer {
    tokens: HashMap<String, TokenMetadata>,
    verified: Vec<String>,
    call_count: AtomicU32,
}

impl MockExplorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, address: &str, metadata: TokenMetadata, verified: bool) -> Self {
        let key = address.to_lowercase();
        if verified {
            self.verified.push(key.clone());
        }
        self.tokens.insert(key, metadata);
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenExplorer for MockExplorer {
    async fn token_metadata(&self, address: &str) -> Result<Option<TokenMetadata>, ClientError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.tokens.get(&address.to_lowercase()).cloned())
    }

    async fn is_verified(&self, address: &str) -> Result<bool, ClientError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.verified.contains(&address.to_lowercase()))
    }
}

// -- Minter --

pub struct MockMinter {
    available: AtomicBool,
    call_count: AtomicU32,
    recipients: Mutex<Vec<(String, String)>>,
}

impl MockMinter {
    pub fn new() -> Self {
        Self {
            available: AtomicBool::new(true),
            call_count: AtomicU32::new(0),
            recipients: Mutex::new(Vec::new()),
        }
    }

    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// `(recipient, amount)` of every mint attempted so far.
    pub fn mints(&self) -> Vec<(String, String)> {
        self.recipients
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Default for MockMinter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CoinMinter for MockMinter {
    async fn mint(&self, recipient: &str, amount: &str) -> Result<MintReceipt, ClientError> {
        let n = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut recipients) = self.recipients.lock() {
            recipients.push((recipient.to_string(), amount.to_string()));
        }
        if !self.available.load(Ordering::SeqCst) {
            return Err(unavailable("minter"));
        }
        Ok(MintReceipt {
            tx_hash: format!("0x{:064x}", n),
        })
    }
}

// -- Images --

pub struct MockImageGenerator {
    available: AtomicBool,
    url: String,
    revised_prompt: Option<String>,
}

impl MockImageGenerator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            available: AtomicBool::new(true),
            url: url.into(),
            revised_prompt: None,
        }
    }

    pub fn with_revised_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.revised_prompt = Some(prompt.into());
        self
    }

    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, _prompt: &str) -> Result<GeneratedImage, ClientError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(unavailable("image generator"));
        }
        Ok(GeneratedImage {
            url: self.url.clone(),
            revised_prompt: self.revised_prompt.clone(),
        })
    }
}

// -- Fetcher --

pub struct MockFetcher {
    body: Bytes,
    content_type: Option<String>,
}

impl MockFetcher {
    pub fn new(body: impl Into<Bytes>, content_type: Option<&str>) -> Self {
        Self {
            body: body.into(),
            content_type: content_type.map(str::to_string),
        }
    }
}

#[async_trait]
impl RemoteFetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedObject, ClientError> {
        Ok(FetchedObject {
            bytes: self.body.clone(),
            content_type: self.content_type.clone(),
        })
    }
}

// -- Blob store --

#[derive(Default)]
pub struct MockBlobStore {
    objects: Mutex<Vec<(String, Bytes, String)>>,
}

impl MockBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(pathname, data, content_type)` of every stored object.
    pub fn objects(&self) -> Vec<(String, Bytes, String)> {
        self.objects.lock().map(|o| o.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl BlobStore for MockBlobStore {
    async fn put(
        &self,
        pathname: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, ClientError> {
        if let Ok(mut objects) = self.objects.lock() {
            objects.push((pathname.to_string(), data, content_type.to_string()));
        }
        Ok(format!("https://blob.mock/{}", pathname))
    }
}

// -- Speech --

pub struct MockSpeech {
    audio: Bytes,
    failure: Option<(u16, String)>,
}

impl MockSpeech {
    pub fn new(audio: impl Into<Bytes>) -> Self {
        Self {
            audio: audio.into(),
            failure: None,
        }
    }

    /// Make every call fail with this upstream status and body.
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self {
            audio: Bytes::new(),
            failure: Some((status, body.into())),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, _text: &str) -> Result<AudioStream, ClientError> {
        if let Some((status, body)) = &self.failure {
            return Err(ClientError::Status {
                status: *status,
                body: body.clone(),
            });
        }
        let audio = self.audio.clone();
        Ok(stream::once(async move { Ok(audio) }).boxed())
    }
}
