//! Integration tests for checkout against a fake backend.
//!
//! These tests drive `CheckoutClient` over real HTTP and verify the request
//! body and headers the backend receives, and how every kind of backend
//! answer is reported.

use axum::http::StatusCode;
use capebiz_client::{CheckoutClient, CheckoutError};
use capebiz_core::catalog::{self, SubscriptionPlan};
use capebiz_core::{BusinessId, CartStore, MemoryStorage};
use capebiz_integration_tests::FakeBackend;
use rust_decimal::Decimal;
use serde_json::json;

fn sample_cart() -> CartStore<MemoryStorage> {
    let mut cart = CartStore::load(MemoryStorage::new()).unwrap();
    cart.add_line(catalog::boost(BusinessId::new("42"), "Joe's Plumbing"))
        .unwrap();
    cart.add_line(catalog::boost(BusinessId::new("42"), "Joe's Plumbing"))
        .unwrap();
    cart.add_line(SubscriptionPlan::find("starter").unwrap().line_item())
        .unwrap();
    cart
}

// =============================================================================
// Successful Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_returns_payment_url() {
    let backend = FakeBackend::spawn().await;
    let client = CheckoutClient::new(&backend.config()).unwrap();
    let cart = sample_cart();

    let payment_url = client.checkout(&cart).await.unwrap();
    assert_eq!(
        payment_url.as_str(),
        "https://sandbox.payfast.co.za/eng/process?m_payment_id=1"
    );
}

#[tokio::test]
async fn test_checkout_sends_items_and_total() {
    let backend = FakeBackend::spawn().await;
    let client = CheckoutClient::new(&backend.config().with_csrf_token("csrf-abc")).unwrap();
    let cart = sample_cart();

    client.checkout(&cart).await.unwrap();

    let checkouts = backend.checkouts();
    assert_eq!(checkouts.len(), 1);
    let request = &checkouts[0];

    assert_eq!(request.csrf_token.as_deref(), Some("csrf-abc"));
    assert_eq!(request.requested_with.as_deref(), Some("XMLHttpRequest"));

    let items = request.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "42");
    assert_eq!(items[0]["type"], "boost");
    assert_eq!(items[0]["name"], "Boost for Joe's Plumbing");
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(items[0]["duration"], "7 days");
    assert_eq!(items[1]["type"], "subscription");
    assert_eq!(items[1]["name"], "Starter Subscription");
    assert_eq!(request.body["total"].as_f64(), Some(397.0));
}

#[tokio::test]
async fn test_checkout_without_token_sends_empty_header() {
    let backend = FakeBackend::spawn().await;
    let client = CheckoutClient::new(&backend.config()).unwrap();

    client.checkout(&sample_cart()).await.unwrap();

    assert_eq!(backend.checkouts()[0].csrf_token.as_deref(), Some(""));
}

#[tokio::test]
async fn test_relative_payment_url_resolves_against_backend() {
    let backend = FakeBackend::spawn().await;
    backend.reply_to_checkout(
        StatusCode::OK,
        &json!({"success": true, "payment_url": "/payment/redirect/7"}),
    );
    let client = CheckoutClient::new(&backend.config()).unwrap();

    let payment_url = client.checkout(&sample_cart()).await.unwrap();
    assert_eq!(
        payment_url.as_str(),
        format!("{}payment/redirect/7", backend.base_url())
    );
}

#[tokio::test]
async fn test_checkout_leaves_cart_untouched() {
    let backend = FakeBackend::spawn().await;
    let client = CheckoutClient::new(&backend.config()).unwrap();
    let cart = sample_cart();
    let before = cart.items().to_vec();

    client.checkout(&cart).await.unwrap();

    assert_eq!(cart.items(), before.as_slice());
    assert_eq!(cart.total(), Decimal::from(397));
}

// =============================================================================
// Failed Checkout
// =============================================================================

#[tokio::test]
async fn test_empty_cart_sends_nothing() {
    let backend = FakeBackend::spawn().await;
    let client = CheckoutClient::new(&backend.config()).unwrap();
    let cart = CartStore::load(MemoryStorage::new()).unwrap();

    let err = client.checkout(&cart).await.unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart));
    assert_eq!(err.user_message(), "Cart is empty");
    assert!(backend.checkouts().is_empty());
}

#[tokio::test]
async fn test_rejected_checkout_reports_backend_message() {
    let backend = FakeBackend::spawn().await;
    backend.reply_to_checkout(
        StatusCode::OK,
        &json!({"success": false, "message": "Plan no longer available"}),
    );
    let client = CheckoutClient::new(&backend.config()).unwrap();

    let err = client.checkout(&sample_cart()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Rejected(_)));
    assert_eq!(err.user_message(), "Plan no longer available");
}

#[tokio::test]
async fn test_rejected_checkout_without_message() {
    let backend = FakeBackend::spawn().await;
    backend.reply_to_checkout(StatusCode::OK, &json!({"success": false}));
    let client = CheckoutClient::new(&backend.config()).unwrap();

    let err = client.checkout(&sample_cart()).await.unwrap_err();
    assert_eq!(err.user_message(), "Checkout failed");
}

#[tokio::test]
async fn test_non_success_status_is_an_api_error() {
    let backend = FakeBackend::spawn().await;
    backend.reply_to_checkout(
        StatusCode::BAD_REQUEST,
        &json!({"success": false, "message": "Invalid cart"}),
    );
    let client = CheckoutClient::new(&backend.config()).unwrap();

    let err = client.checkout(&sample_cart()).await.unwrap_err();
    match err {
        CheckoutError::Api { status, ref message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid cart");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_error_body_uses_status_reason() {
    let backend = FakeBackend::spawn().await;
    backend.reply_to_checkout_raw(StatusCode::SERVICE_UNAVAILABLE, "upstream down");
    let client = CheckoutClient::new(&backend.config()).unwrap();

    let err = client.checkout(&sample_cart()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Api { status: 503, .. }));
    assert_eq!(err.user_message(), "Service Unavailable");
}

#[tokio::test]
async fn test_success_without_payment_url() {
    let backend = FakeBackend::spawn().await;
    backend.reply_to_checkout(StatusCode::OK, &json!({"success": true}));
    let client = CheckoutClient::new(&backend.config()).unwrap();

    let err = client.checkout(&sample_cart()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::MissingPaymentUrl));
}

#[tokio::test]
async fn test_unparseable_success_body() {
    let backend = FakeBackend::spawn().await;
    backend.reply_to_checkout_raw(StatusCode::OK, "<html>oops</html>");
    let client = CheckoutClient::new(&backend.config()).unwrap();

    let err = client.checkout(&sample_cart()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Parse(_)));
}
