//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CAPEBIZ_BASE_URL` - Directory site URL (default: `http://localhost:5000`)
//! - `CAPEBIZ_CHECKOUT_PATH` - Checkout endpoint path (default: `/api/checkout`)
//! - `CAPEBIZ_CSRF_TOKEN` - CSRF token sent as `X-CSRFToken`
//! - `CAPEBIZ_STORAGE_PATH` - Local cart storage file (default: `.capebiz/storage.json`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_CHECKOUT_PATH: &str = "/api/checkout";
const DEFAULT_STORAGE_PATH: &str = ".capebiz/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Cart client configuration.
///
/// Implements `Debug` manually to redact the CSRF token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the directory site
    pub base_url: Url,
    /// Path of the checkout endpoint, relative to `base_url`
    pub checkout_path: String,
    /// CSRF token for state-changing requests
    pub csrf_token: Option<SecretString>,
    /// File holding the local cart storage
    pub storage_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production")
    pub sentry_environment: Option<String>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("checkout_path", &self.checkout_path)
            .field(
                "csrf_token",
                &self.csrf_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("storage_path", &self.storage_path)
            .field("sentry_dsn", &self.sentry_dsn)
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

impl ClientConfig {
    /// Configuration for `base_url` with every other setting at its default.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            checkout_path: DEFAULT_CHECKOUT_PATH.to_string(),
            csrf_token: None,
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_base = lookup("CAPEBIZ_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_base).map_err(|e| {
            ConfigError::InvalidEnvVar("CAPEBIZ_BASE_URL".to_string(), e.to_string())
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "CAPEBIZ_BASE_URL".to_string(),
                format!("unsupported scheme {}", base_url.scheme()),
            ));
        }

        let checkout_path =
            lookup("CAPEBIZ_CHECKOUT_PATH").unwrap_or_else(|| DEFAULT_CHECKOUT_PATH.to_string());
        if !checkout_path.starts_with('/') {
            return Err(ConfigError::InvalidEnvVar(
                "CAPEBIZ_CHECKOUT_PATH".to_string(),
                "must start with '/'".to_string(),
            ));
        }

        let csrf_token = lookup("CAPEBIZ_CSRF_TOKEN")
            .filter(|token| !token.is_empty())
            .map(SecretString::from);
        let storage_path = lookup("CAPEBIZ_STORAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);

        Ok(Self {
            base_url,
            checkout_path,
            csrf_token,
            storage_path,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    #[must_use]
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(SecretString::from(token.into()));
        self
    }

    #[must_use]
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    /// Absolute URL of the checkout endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the path cannot be joined onto the base URL.
    pub fn checkout_url(&self) -> Result<Url, ConfigError> {
        Ok(self.base_url.join(&self.checkout_path)?)
    }

    /// Absolute URL of the view-tracking endpoint for a business.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL cannot be built.
    pub fn business_view_url(&self, business_id: &str) -> Result<Url, ConfigError> {
        let mut url = self.base_url.join("/api/business/")?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(business_id)
            .push("view");
        Ok(url)
    }
}
