use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use testify_types::api::{AckResponse, StatusResponse};
use testify_types::events::{WebhookEvent, WebhookEventKind};

use crate::state::AppState;

/// Hands parsed webhook events to the background processor so the
/// acknowledgment never waits on processing.
#[derive(Clone)]
pub struct WebhookQueue {
    tx: mpsc::Sender<WebhookEvent>,
}

/// Events held while the processor catches up.
pub const WEBHOOK_QUEUE_CAPACITY: usize = 1024;

impl WebhookQueue {
    pub fn new() -> (Self, mpsc::Receiver<WebhookEvent>) {
        Self::with_capacity(WEBHOOK_QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<WebhookEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Returns false when the queue is full or the processor is gone.
    pub fn enqueue(&self, event: WebhookEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(event)) => {
                warn!("Webhook queue full, dropping {:?}", event.kind);
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!("Webhook processor is not running; event dropped");
                false
            }
        }
    }
}

/// Drains the webhook queue until every sender is dropped.
pub async fn run_webhook_processor(mut rx: mpsc::Receiver<WebhookEvent>) {
    while let Some(event) = rx.recv().await {
        process(&event);
    }
    info!("Webhook processor stopped");
}

fn process(event: &WebhookEvent) {
    let fid = event
        .fid
        .map(|f| f.to_string())
        .unwrap_or_else(|| "unknown".into());

    match &event.kind {
        WebhookEventKind::FrameAdded => info!("Mini-app added by fid {}", fid),
        WebhookEventKind::FrameRemoved => info!("Mini-app removed by fid {}", fid),
        WebhookEventKind::Other(name) => debug!("Ignoring webhook event '{}' from fid {}", name, fid),
    }
}

/// GET /webhook
pub async fn webhook_status() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

/// POST /webhook: always 200. Failures are logged and reported in the body
/// only, so the platform never retries.
pub async fn receive_webhook(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Json<AckResponse> {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            warn!("Unreadable webhook body: {}", e.body_text());
            return Json(AckResponse { success: false });
        }
    };

    let event = match WebhookEvent::parse(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!("Unparseable webhook body ({} bytes): {}", body.len(), e);
            return Json(AckResponse { success: false });
        }
    };

    debug!("Webhook event received: {:?}", event.kind);
    let queued = state.webhooks.enqueue(event);
    Json(AckResponse { success: queued })
}
