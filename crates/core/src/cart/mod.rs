//! Cart line items, the cart store, and change notifications.

mod event;
mod item;
mod store;

pub use event::{CartChange, CartEvent, CartObserver, CartSummary, SubscriptionId};
pub use item::{CheckoutPayload, LineItem, NewLineItem};
pub use store::{CART_STORAGE_KEY, CartStore};
