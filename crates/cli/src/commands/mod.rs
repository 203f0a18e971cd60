//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod view;

use capebiz_client::{ClientError, FileStorage};
use capebiz_core::{CartEvent, CartStore, StorageError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Plan code not in the catalog.
    #[error("Unknown plan: {0}. Run `capebiz plans` to list plans")]
    UnknownPlan(String),

    /// Cart storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Client setup or request failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Open the cart stored at `storage` and announce changes as log lines.
pub fn open_cart(storage: FileStorage) -> Result<CartStore<FileStorage>, CommandError> {
    let mut cart = CartStore::load(storage)?;
    cart.subscribe(announce);
    Ok(cart)
}

/// Log the notification for a cart change, if it has one.
fn announce(event: &CartEvent) {
    if let Some(message) = event.message() {
        tracing::info!(
            item_count = event.summary.item_count,
            total = %event.summary.total,
            "{message}"
        );
    }
}
