//! Business page view tracking.
//!
//! Best effort: a failed or rejected tracking request is logged at debug
//! level and otherwise ignored. Tracking never surfaces an error to the user.

use capebiz_core::BusinessId;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::build_http_client;

/// Records business listing views with the directory backend.
#[derive(Debug, Clone)]
pub struct ViewTracker {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ViewTracker {
    /// Create a new view tracker.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(config)?,
            config: config.clone(),
        })
    }

    /// Record a view of a business page.
    ///
    /// Returns whether the backend accepted the view.
    #[instrument(skip(self, business_id), fields(business_id = %business_id))]
    pub async fn track_business_view(&self, business_id: &BusinessId) -> bool {
        let url = match self.config.business_view_url(business_id.as_str()) {
            Ok(url) => url,
            Err(e) => {
                debug!(error = %e, "Could not build view tracking URL");
                return false;
            }
        };

        match self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                debug!(status = response.status().as_u16(), "View tracking rejected");
                false
            }
            Err(e) => {
                debug!(error = %e, "View tracking failed");
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;

    #[tokio::test]
    async fn test_unreachable_backend_is_swallowed() {
        // Port 9 (discard) is not expected to be listening on loopback.
        let config = ClientConfig::new(Url::parse("http://127.0.0.1:9").unwrap());
        let tracker = ViewTracker::new(&config).unwrap();

        assert!(!tracker.track_business_view(&BusinessId::new("42")).await);
    }
}
