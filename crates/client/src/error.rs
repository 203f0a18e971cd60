//! Unified error type for cart front ends.
//!
//! Front ends (the CLI, integration harnesses) deal with configuration,
//! storage and HTTP failures together; `ClientError` wraps each concern's own
//! error so callers can propagate with `?`.

use capebiz_core::StorageError;
use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;

/// Client-level error type.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cart storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// HTTP client could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A configured value is not a valid HTTP header.
    #[error("Invalid header {0}: {1}")]
    InvalidHeader(&'static str, String),
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        let err = ClientError::Checkout(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout error: Cart is empty");

        let err = ClientError::Storage(StorageError::Backend("disk full".to_string()));
        assert_eq!(
            err.to_string(),
            "Storage error: Storage backend error: disk full"
        );
    }
}
