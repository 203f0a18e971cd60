//! CapeBiz Client - Durable storage and backend clients for the cart.
//!
//! # Architecture
//!
//! - [`FileStorage`] persists the cart to a local JSON file, playing the role
//!   the browser's local storage plays on the directory's pages
//! - [`CheckoutClient`] posts the cart to the checkout endpoint
//! - [`ViewTracker`] records business page views (fire and forget)
//!
//! The cart store itself lives in `capebiz-core`; this crate only reads it.
//!
//! # Example
//!
//! ```rust,ignore
//! use capebiz_client::{CheckoutClient, ClientConfig, FileStorage};
//! use capebiz_core::{CartStore, catalog};
//!
//! let config = ClientConfig::from_env()?;
//! let mut cart = CartStore::load(FileStorage::new(&config.storage_path))?;
//! cart.add_line(catalog::boost("42".into(), "Joe's Plumbing"))?;
//!
//! let payment_url = CheckoutClient::new(&config)?.checkout(&cart).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod error;
mod http;
pub mod storage;
pub mod tracking;

pub use checkout::{CheckoutClient, CheckoutError, CheckoutResponse};
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, Result};
pub use http::CSRF_HEADER;
pub use storage::FileStorage;
pub use tracking::ViewTracker;
