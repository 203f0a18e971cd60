//! Change notifications emitted by the cart store.

use rust_decimal::Decimal;
use serde::Serialize;

/// Aggregate view of the cart sent with every change: `{itemCount, total}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub item_count: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// What a mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// An item was appended, or an existing line's quantity went up by one.
    ItemAdded { name: String, quantity: u32 },
    /// A line was removed.
    ItemRemoved { name: String },
    /// A line's quantity was set.
    QuantityUpdated { index: usize, quantity: u32 },
    /// Every line was removed.
    Cleared,
}

/// A change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEvent {
    pub change: CartChange,
    pub summary: CartSummary,
}

impl CartEvent {
    /// Toast text for the change, if it warrants one.
    ///
    /// Quantity edits happen in place on the cart page and are not announced.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match &self.change {
            CartChange::ItemAdded { name, .. } => Some(format!("{name} added to cart")),
            CartChange::ItemRemoved { name } => Some(format!("{name} removed from cart")),
            CartChange::QuantityUpdated { .. } => None,
            CartChange::Cleared => Some("Cart cleared".to_string()),
        }
    }
}

/// Receives cart change notifications.
///
/// Implemented for any `Fn(&CartEvent)`, so closures can subscribe directly.
pub trait CartObserver {
    fn on_cart_changed(&self, event: &CartEvent);
}

impl<F> CartObserver for F
where
    F: Fn(&CartEvent),
{
    fn on_cart_changed(&self, event: &CartEvent) {
        self(event);
    }
}

/// Handle returned by `CartStore::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) const fn new(id: u64) -> Self {
        Self(id)
    }
}
