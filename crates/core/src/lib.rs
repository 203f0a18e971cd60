//! CapeBiz Core - Cart store and shared types.
//!
//! This crate provides the cart state used by every CapeBiz Connect front end:
//! - `capebiz-client` - File-backed storage, checkout and view tracking clients
//! - `capebiz-cli` - Terminal front end for the cart
//!
//! # Architecture
//!
//! The core crate contains types, the [`CartStore`] and the [`CartStorage`]
//! trait - no HTTP clients and no filesystem access. Durable storage backends
//! live in `capebiz-client`; an in-memory backend ships here for tests and
//! ephemeral sessions.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, and item kinds
//! - [`cart`] - Line items, the cart store, and change notifications
//! - [`storage`] - Key/value storage abstraction the cart persists through
//! - [`catalog`] - Preset line items for boosts and subscription plans

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod storage;
pub mod types;

pub use cart::{
    CART_STORAGE_KEY, CartChange, CartEvent, CartObserver, CartStore, CartSummary,
    CheckoutPayload, LineItem, NewLineItem, SubscriptionId,
};
pub use storage::{CartStorage, MemoryStorage, StorageError};
pub use types::*;
