//! The cart store.
//!
//! An ordered list of line items mirrored to a [`CartStorage`] backend. Every
//! applied mutation rewrites the stored list and then notifies subscribers.
//! Out-of-range indices and non-positive quantities are ignored without
//! touching storage or notifying anyone.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::event::{CartChange, CartEvent, CartObserver, CartSummary, SubscriptionId};
use super::item::{CheckoutPayload, LineItem, NewLineItem};
use crate::storage::{CartStorage, StorageError};
use crate::types::{ItemId, ItemKind, Totals};

/// Storage key the cart is kept under.
pub const CART_STORAGE_KEY: &str = "capebiz_cart";

/// A shopping cart backed by durable storage.
///
/// One store per session. The store is single-threaded: mutators take
/// `&mut self` and observers are called synchronously before the mutator
/// returns.
pub struct CartStore<S: CartStorage> {
    items: Vec<LineItem>,
    storage: S,
    observers: Vec<(SubscriptionId, Box<dyn CartObserver>)>,
    next_subscription: u64,
}

impl<S: CartStorage> std::fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl<S: CartStorage> CartStore<S> {
    /// Rehydrate a cart from `storage`.
    ///
    /// A missing entry yields an empty cart. A stored value that is not a
    /// valid item list is logged and treated as empty; it is overwritten by
    /// the next mutation. Lines with quantity 0 are dropped and lines sharing
    /// an identity key are merged into the first one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub fn load(storage: S) -> Result<Self, StorageError> {
        let items = match storage.get_item(CART_STORAGE_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<LineItem>>(&raw) {
                Ok(items) => normalize(items),
                Err(e) => {
                    warn!(error = %e, "Stored cart is unreadable, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        debug!(lines = items.len(), "Cart loaded");

        Ok(Self {
            items,
            storage,
            observers: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Add one unit of an item.
    ///
    /// If a line with the same `(id, kind)` exists its quantity goes up by one
    /// and its name, price and duration are left as they were. Otherwise a new
    /// line with quantity 1 is appended.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn add_item(
        &mut self,
        id: impl Into<ItemId>,
        kind: ItemKind,
        name: impl Into<String>,
        unit_price: Decimal,
        duration: Option<String>,
    ) -> Result<(), StorageError> {
        let mut item = NewLineItem::new(id, kind, name, unit_price);
        item.duration = duration;
        self.add_line(item)
    }

    /// Add one unit of a prepared item. See [`CartStore::add_item`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn add_line(&mut self, item: NewLineItem) -> Result<(), StorageError> {
        let change = if let Some(existing) = self
            .items
            .iter_mut()
            .find(|line| line.matches(&item.id, &item.kind))
        {
            existing.quantity = existing.quantity.saturating_add(1);
            CartChange::ItemAdded {
                name: existing.name.clone(),
                quantity: existing.quantity,
            }
        } else {
            let name = item.name.clone();
            self.items.push(item.into_line_item(Utc::now()));
            CartChange::ItemAdded { name, quantity: 1 }
        };

        self.persist(change)
    }

    /// Remove the line at `index`.
    ///
    /// Returns the removed line, or `None` if `index` is out of range (in
    /// which case nothing is persisted or notified).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn remove_item(&mut self, index: usize) -> Result<Option<LineItem>, StorageError> {
        if index >= self.items.len() {
            return Ok(None);
        }

        let removed = self.items.remove(index);
        self.persist(CartChange::ItemRemoved {
            name: removed.name.clone(),
        })?;
        Ok(Some(removed))
    }

    /// Set the quantity of the line at `index`.
    ///
    /// Returns `false` without changing anything if `index` is out of range
    /// or `quantity` is 0. A zero quantity never removes a line; use
    /// [`CartStore::remove_item`] for that.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn update_quantity(&mut self, index: usize, quantity: u32) -> Result<bool, StorageError> {
        if quantity == 0 {
            return Ok(false);
        }
        let Some(line) = self.items.get_mut(index) else {
            return Ok(false);
        };

        line.quantity = quantity;
        self.persist(CartChange::QuantityUpdated { index, quantity })?;
        Ok(true)
    }

    /// Remove every line. Persists and notifies even if already empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn clear_cart(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.persist(CartChange::Cleared)
    }

    /// Sum of `unit_price × quantity` over all lines, saturating at the
    /// `Decimal` bounds.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Item count and total together.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            item_count: self.item_count(),
            total: self.total(),
        }
    }

    /// Subtotal, VAT and grand total.
    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals::from_subtotal(self.total())
    }

    /// The checkout request body.
    #[must_use]
    pub fn checkout_payload(&self) -> CheckoutPayload {
        CheckoutPayload {
            items: self.items.clone(),
            total: self.total(),
        }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Register an observer for change notifications.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning its storage backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Write the full list to storage, then notify subscribers.
    ///
    /// Subscribers are not notified if the write fails; the in-memory list
    /// keeps the mutation either way.
    fn persist(&mut self, change: CartChange) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.items)?;
        self.storage.set_item(CART_STORAGE_KEY, &raw)?;

        let event = CartEvent {
            change,
            summary: self.summary(),
        };
        debug!(
            change = ?event.change,
            item_count = event.summary.item_count,
            total = %event.summary.total,
            "Cart updated"
        );

        for (_, observer) in &self.observers {
            observer.on_cart_changed(&event);
        }
        Ok(())
    }
}

/// Restore invariants on a list read from storage.
fn normalize(items: Vec<LineItem>) -> Vec<LineItem> {
    let mut out: Vec<LineItem> = Vec::with_capacity(items.len());

    for item in items {
        if item.quantity == 0 {
            warn!(
                id = %item.id,
                kind = %item.kind,
                "Dropping stored cart line with zero quantity"
            );
            continue;
        }
        if let Some(existing) = out.iter_mut().find(|line| line.matches(&item.id, &item.kind)) {
            warn!(id = %item.id, kind = %item.kind, "Merging duplicate stored cart line");
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            out.push(item);
        }
    }

    out
}
