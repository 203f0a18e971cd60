//! Integration tests for the CapeBiz Connect cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p capebiz-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Checkout client against a fake backend
//! - `view_tracking` - View tracker against a fake backend
//! - `cart_persistence` - File-backed cart across reloads
//!
//! The fake backend is an in-process axum server bound to an ephemeral
//! loopback port. It records every request it receives and answers checkout
//! requests with a reply the test chooses.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use capebiz_client::{CSRF_HEADER, ClientConfig};
use serde_json::Value;
use url::Url;

/// A checkout request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedCheckout {
    pub body: Value,
    pub csrf_token: Option<String>,
    pub requested_with: Option<String>,
}

#[derive(Debug)]
struct BackendState {
    checkout_reply: Mutex<(StatusCode, String)>,
    view_status: Mutex<StatusCode>,
    checkouts: Mutex<Vec<RecordedCheckout>>,
    views: Mutex<Vec<String>>,
}

/// In-process stand-in for the directory backend.
pub struct FakeBackend {
    base_url: Url,
    state: Arc<BackendState>,
    handle: tokio::task::JoinHandle<()>,
}

impl FakeBackend {
    /// Start a backend that accepts checkouts with a sandbox payment URL.
    ///
    /// # Panics
    ///
    /// Panics if the loopback listener cannot be bound.
    pub async fn spawn() -> Self {
        let state = Arc::new(BackendState {
            checkout_reply: Mutex::new((
                StatusCode::OK,
                serde_json::json!({
                    "success": true,
                    "payment_url": "https://sandbox.payfast.co.za/eng/process?m_payment_id=1"
                })
                .to_string(),
            )),
            view_status: Mutex::new(StatusCode::OK),
            checkouts: Mutex::new(Vec::new()),
            views: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/checkout", post(checkout))
            .route("/api/business/{id}/view", post(business_view))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().expect("listener has no address");
        let base_url = Url::parse(&format!("http://{addr}")).expect("loopback URL is valid");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend failed");
        });

        Self {
            base_url,
            state,
            handle,
        }
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Client configuration pointing at this backend.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone())
    }

    /// Answer subsequent checkouts with `status` and a JSON `body`.
    pub fn reply_to_checkout(&self, status: StatusCode, body: &Value) {
        *lock(&self.state.checkout_reply) = (status, body.to_string());
    }

    /// Answer subsequent checkouts with `status` and a raw text body.
    pub fn reply_to_checkout_raw(&self, status: StatusCode, body: &str) {
        *lock(&self.state.checkout_reply) = (status, body.to_owned());
    }

    /// Answer subsequent view tracking requests with `status`.
    pub fn reply_to_views(&self, status: StatusCode) {
        *lock(&self.state.view_status) = status;
    }

    /// Checkout requests received so far.
    #[must_use]
    pub fn checkouts(&self) -> Vec<RecordedCheckout> {
        lock(&self.state.checkouts).clone()
    }

    /// Business IDs whose views were recorded so far.
    #[must_use]
    pub fn views(&self) -> Vec<String> {
        lock(&self.state.views).clone()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

async fn checkout(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    lock(&state.checkouts).push(RecordedCheckout {
        body,
        csrf_token: header_value(&headers, CSRF_HEADER),
        requested_with: header_value(&headers, "X-Requested-With"),
    });

    let (status, body) = lock(&state.checkout_reply).clone();
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn business_view(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
) -> StatusCode {
    let status = *lock(&state.view_status);
    if status.is_success() {
        lock(&state.views).push(id);
    }
    status
}

/// A fresh storage file path under the system temp directory.
#[must_use]
pub fn temp_storage_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("capebiz-it-{}", uuid::Uuid::new_v4()))
        .join("storage.json")
}
