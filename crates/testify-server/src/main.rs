mod config;

use std::sync::Arc;

use tracing::{info, warn};

use testify_api::routes;
use testify_api::state::{AppStateInner, Integrations};
use testify_api::webhook::{WebhookQueue, run_webhook_processor};
use testify_clients::blob::VercelBlobStore;
use testify_clients::explorer::BasescanExplorer;
use testify_clients::fetch::HttpFetcher;
use testify_clients::images::OpenAiImages;
use testify_clients::minter::RelayMinter;
use testify_clients::speech::ElevenLabsSpeech;
use testify_clients::{
    BlobStore, CoinMinter, ImageGenerator, SpeechSynthesizer, build_http_client,
};
use testify_store::Store;

use crate::config::Config;

const DEFAULT_LOG_FILTER: &str =
    "testify_server=debug,testify_api=debug,testify_clients=debug,testify_store=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let config = Config::from_env()?;
    let http = build_http_client()?;

    let integrations = Integrations {
        explorer: Arc::new(BasescanExplorer::new(
            http.clone(),
            config.basescan_api_url.clone(),
            config.basescan_api_key.clone(),
        )),
        fetcher: Arc::new(HttpFetcher::new(http.clone())),
        minter: config.mint_relay_url.as_ref().map(|url| {
            Arc::new(RelayMinter::new(http.clone(), url.clone(), config.mint_relay_key.clone()))
                as Arc<dyn CoinMinter>
        }),
        images: config.openai_api_key.as_ref().map(|key| {
            Arc::new(OpenAiImages::new(http.clone(), config.openai_api_url.clone(), key.clone()))
                as Arc<dyn ImageGenerator>
        }),
        blobs: config.blob_token.as_ref().map(|token| {
            Arc::new(VercelBlobStore::new(http.clone(), config.blob_api_url.clone(), token.clone()))
                as Arc<dyn BlobStore>
        }),
        speech: config.elevenlabs_api_key.as_ref().map(|key| {
            Arc::new(ElevenLabsSpeech::new(
                http.clone(),
                config.elevenlabs_api_url.clone(),
                key.clone(),
            )) as Arc<dyn SpeechSynthesizer>
        }),
    };

    log_integrations(&integrations);

    let (webhooks, webhook_rx) = WebhookQueue::new();
    tokio::spawn(run_webhook_processor(webhook_rx));

    let state = Arc::new(AppStateInner {
        store: Store::new(),
        integrations,
        webhooks,
    });

    let app = routes::router(state);

    let addr = config.listen_addr()?;
    info!("Testify server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn log_integrations(integrations: &Integrations) {
    let disabled: Vec<&str> = [
        ("coin minting", integrations.minter.is_some()),
        ("image generation", integrations.images.is_some()),
        ("blob storage", integrations.blobs.is_some()),
        ("text-to-speech", integrations.speech.is_some()),
    ]
    .into_iter()
    .filter(|(_, enabled)| !enabled)
    .map(|(name, _)| name)
    .collect();

    if disabled.is_empty() {
        info!("All integrations configured");
    } else {
        warn!("Integrations disabled (no credentials): {}", disabled.join(", "));
    }
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
