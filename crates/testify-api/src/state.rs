use std::sync::Arc;

use testify_clients::{
    BlobStore, CoinMinter, ImageGenerator, RemoteFetcher, SpeechSynthesizer, TokenExplorer,
};
use testify_store::Store;

use crate::webhook::WebhookQueue;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Store,
    pub integrations: Integrations,
    pub webhooks: WebhookQueue,
}

/// External services. `None` means the credential was not configured and
/// the dependent endpoint answers with a configuration error.
pub struct Integrations {
    pub explorer: Arc<dyn TokenExplorer>,
    pub fetcher: Arc<dyn RemoteFetcher>,
    pub minter: Option<Arc<dyn CoinMinter>>,
    pub images: Option<Arc<dyn ImageGenerator>>,
    pub blobs: Option<Arc<dyn BlobStore>>,
    pub speech: Option<Arc<dyn SpeechSynthesizer>>,
}
