//! Checkout client.
//!
//! Posts the cart as `{items, total}` to the checkout endpoint. The backend
//! answers `{success, payment_url?, message?}`; on success the caller sends
//! the user to the payment URL. The cart itself is only read, never cleared
//! or otherwise changed, whatever the outcome.

use capebiz_core::{CartStorage, CartStore, CheckoutPayload};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::build_http_client;

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to check out.
    #[error("Cart is empty")]
    EmptyCart,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-2xx status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Backend answered `success: false`.
    #[error("Checkout rejected: {0}")]
    Rejected(String),

    /// Backend answered `success: true` without somewhere to pay.
    #[error("Checkout succeeded without a payment URL")]
    MissingPaymentUrl,

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl CheckoutError {
    /// Text to show the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCart => "Cart is empty".to_string(),
            Self::Api { message, .. } | Self::Rejected(message) => message.clone(),
            Self::Http(_) => "Could not reach the checkout service".to_string(),
            Self::MissingPaymentUrl | Self::Parse(_) => "Checkout failed".to_string(),
        }
    }
}

/// Checkout endpoint response body.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutResponse {
    pub success: bool,
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Client for the checkout endpoint.
#[derive(Debug, Clone)]
pub struct CheckoutClient {
    client: reqwest::Client,
    checkout_url: Url,
}

impl CheckoutClient {
    /// Create a new checkout client.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(config)?,
            checkout_url: config.checkout_url()?,
        })
    }

    #[must_use]
    pub const fn checkout_url(&self) -> &Url {
        &self.checkout_url
    }

    /// Check out the cart and return the payment URL to redirect to.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` without sending anything if the
    /// cart is empty, and any error from [`CheckoutClient::submit`].
    pub async fn checkout<S: CartStorage>(
        &self,
        cart: &CartStore<S>,
    ) -> Result<Url, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.submit(&cart.checkout_payload()).await
    }

    /// Send a prepared checkout payload.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the backend responds with a
    /// non-2xx status or `success: false`, or the response lacks a usable
    /// payment URL.
    #[instrument(skip(self, payload), fields(lines = payload.items.len(), total = %payload.total))]
    pub async fn submit(&self, payload: &CheckoutPayload) -> Result<Url, CheckoutError> {
        if payload.items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let response = self
            .client
            .post(self.checkout_url.clone())
            .json(payload)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<CheckoutResponse>(&body)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Checkout failed")
                        .to_string()
                });
            tracing::warn!(status = status.as_u16(), %message, "Checkout request failed");
            return Err(CheckoutError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let result: CheckoutResponse = response
            .json()
            .await
            .map_err(|e| CheckoutError::Parse(e.to_string()))?;

        if !result.success {
            let message = result
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Checkout failed".to_string());
            tracing::warn!(%message, "Checkout rejected");
            return Err(CheckoutError::Rejected(message));
        }

        let payment_url = result
            .payment_url
            .filter(|u| !u.is_empty())
            .ok_or(CheckoutError::MissingPaymentUrl)?;
        let payment_url = self
            .checkout_url
            .join(&payment_url)
            .map_err(|e| CheckoutError::Parse(format!("invalid payment URL: {e}")))?;

        tracing::info!(%payment_url, "Checkout session created");
        Ok(payment_url)
    }
}
