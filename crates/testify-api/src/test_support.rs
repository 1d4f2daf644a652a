use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;

use testify_clients::TokenMetadata;
use testify_clients::mock::{
    MockBlobStore, MockExplorer, MockFetcher, MockImageGenerator, MockMinter, MockSpeech,
};
use testify_store::Store;
use testify_types::events::WebhookEvent;

use crate::routes::router;
use crate::state::{AppState, AppStateInner, Integrations};
use crate::webhook::WebhookQueue;

pub const TOKEN_ADDRESS: &str = "0x0000000000000000000000000000000000000001";

pub struct Harness {
    pub state: AppState,
    pub minter: Arc<MockMinter>,
    pub explorer: Arc<MockExplorer>,
    pub blobs: Arc<MockBlobStore>,
    pub events: mpsc::Receiver<WebhookEvent>,
}

impl Harness {
    pub fn app(&self) -> Router {
        router(self.state.clone())
    }
}

pub fn harness() -> Harness {
    harness_with(|_| {})
}

/// Build state wired to mocks, then let the test swap any integration.
pub fn harness_with(configure: impl FnOnce(&mut Integrations)) -> Harness {
    let minter = Arc::new(MockMinter::new());
    let explorer = Arc::new(MockExplorer::new().with_token(
        TOKEN_ADDRESS,
        TokenMetadata {
            name: "Testify Coin".into(),
            symbol: "TST".into(),
            decimals: Some(18),
            total_supply: Some("1000000".into()),
            token_type: Some("ERC20".into()),
        },
        true,
    ));
    let blobs = Arc::new(MockBlobStore::new());

    let mut integrations = Integrations {
        explorer: explorer.clone(),
        fetcher: Arc::new(MockFetcher::new(&b"PNGDATA"[..], Some("image/png"))),
        minter: Some(minter.clone()),
        images: Some(Arc::new(
            MockImageGenerator::new("https://images.mock/1.png").with_revised_prompt("revised"),
        )),
        blobs: Some(blobs.clone()),
        speech: Some(Arc::new(MockSpeech::new(&b"ID3AUDIO"[..]))),
    };
    configure(&mut integrations);

    let (webhooks, events) = WebhookQueue::new();
    let state = Arc::new(AppStateInner {
        store: Store::new(),
        integrations,
        webhooks,
    });

    Harness {
        state,
        minter,
        explorer,
        blobs,
        events,
    }
}

pub async fn call_bytes(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Bytes) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    send(app, builder.body(body).unwrap()).await
}

pub async fn call(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, _, bytes) = call_bytes(app, method, uri, body).await;
    (status, parse(&bytes))
}

/// Send a raw (possibly invalid) JSON body.
pub async fn call_text(app: Router, method: Method, uri: &str, text: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(text.to_string()))
        .unwrap();
    let (status, _, bytes) = send(app, request).await;
    (status, parse(&bytes))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes)
}

fn parse(bytes: &Bytes) -> Value {
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(bytes).unwrap()
    }
}
