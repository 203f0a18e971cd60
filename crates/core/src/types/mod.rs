//! Core types for CapeBiz Connect.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod kind;
pub mod price;

pub use id::*;
pub use kind::ItemKind;
pub use price::{CurrencyCode, Price, Totals, VAT_RATE};
