//! Line items and the checkout payload.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ItemId, ItemKind, Price};

/// One purchasable entry in the cart.
///
/// Field names on the wire (`type`, `price`, `added`) match the records the
/// directory's pages have always written to local storage, so existing carts
/// load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub name: String,
    /// Stored as a JSON number. Values beyond `f64` precision come back
    /// rounded after a reload, and one that rounds past `Decimal::MAX` makes
    /// the stored list unreadable.
    #[serde(rename = "price", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(rename = "added")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Whether this item has the identity key `(id, kind)`.
    #[must_use]
    pub fn matches(&self, id: &ItemId, kind: &ItemKind) -> bool {
        self.id == *id && self.kind == *kind
    }

    /// `unit_price × quantity`, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Unit price with currency, for display.
    #[must_use]
    pub const fn price(&self) -> Price {
        Price::zar(self.unit_price)
    }
}

/// An item about to be added to a cart.
///
/// Carries everything [`LineItem`] does except the quantity and timestamp,
/// which the store assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    pub id: ItemId,
    pub kind: ItemKind,
    pub name: String,
    pub unit_price: Decimal,
    pub duration: Option<String>,
}

impl NewLineItem {
    /// Create a new item description.
    #[must_use]
    pub fn new(
        id: impl Into<ItemId>,
        kind: ItemKind,
        name: impl Into<String>,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            unit_price,
            duration: None,
        }
    }

    /// Set the human-readable duration (e.g. "7 days").
    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Materialize as a line item with quantity 1 added at `added_at`.
    #[must_use]
    pub fn into_line_item(self, added_at: DateTime<Utc>) -> LineItem {
        LineItem {
            id: self.id,
            kind: self.kind,
            name: self.name,
            unit_price: self.unit_price,
            quantity: 1,
            duration: self.duration,
            added_at,
        }
    }
}

/// Body of the checkout request: `{items, total}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPayload {
    pub items: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}
