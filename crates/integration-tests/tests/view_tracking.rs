//! Integration tests for business view tracking.

use axum::http::StatusCode;
use capebiz_client::ViewTracker;
use capebiz_core::BusinessId;
use capebiz_integration_tests::FakeBackend;

#[tokio::test]
async fn test_view_is_recorded() {
    let backend = FakeBackend::spawn().await;
    let tracker = ViewTracker::new(&backend.config()).unwrap();

    assert!(tracker.track_business_view(&BusinessId::new("42")).await);
    assert!(tracker.track_business_view(&BusinessId::new("7")).await);

    assert_eq!(backend.views(), ["42", "7"]);
}

#[tokio::test]
async fn test_rejected_view_is_swallowed() {
    let backend = FakeBackend::spawn().await;
    backend.reply_to_views(StatusCode::FORBIDDEN);
    let tracker = ViewTracker::new(&backend.config()).unwrap();

    assert!(!tracker.track_business_view(&BusinessId::new("42")).await);
    assert!(backend.views().is_empty());
}
