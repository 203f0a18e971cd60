//! Backend commands: checkout and view tracking.
//!
//! # Usage
//!
//! ```bash
//! # Check out the current cart
//! capebiz checkout
//!
//! # Record a view of a business page
//! capebiz track-view 42
//! ```
//!
//! # Environment Variables
//!
//! - `CAPEBIZ_BASE_URL` - Directory site URL
//! - `CAPEBIZ_CSRF_TOKEN` - CSRF token for the checkout request

use capebiz_client::{CheckoutClient, ClientConfig, ClientError, FileStorage, ViewTracker};
use capebiz_core::{BusinessId, CartStore};

use super::CommandError;

/// Check out the cart and print the payment URL.
///
/// The cart is left as it is; it is the payment flow's job to clear it once
/// payment completes.
#[allow(clippy::print_stdout)]
pub async fn checkout(config: &ClientConfig, storage: FileStorage) -> Result<(), CommandError> {
    let cart = CartStore::load(storage)?;
    let client = CheckoutClient::new(config)?;

    tracing::info!(
        item_count = cart.item_count(),
        total = %cart.total(),
        "Starting checkout"
    );

    match client.checkout(&cart).await {
        Ok(payment_url) => {
            println!("{payment_url}");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "{}", e.user_message());
            Err(ClientError::from(e).into())
        }
    }
}

/// Record a view of a business page. Never fails on backend errors.
pub async fn track_view(config: &ClientConfig, business_id: &str) -> Result<(), CommandError> {
    let tracker = ViewTracker::new(config)?;
    if tracker.track_business_view(&BusinessId::new(business_id)).await {
        tracing::info!(business_id, "View recorded");
    }
    Ok(())
}
