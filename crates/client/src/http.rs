//! Shared HTTP client construction.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Header carrying the CSRF token on state-changing requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Build the HTTP client used for every request to the directory site.
///
/// Every request carries `X-Requested-With: XMLHttpRequest` and the CSRF
/// token (empty when none is configured).
pub(crate) fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client, ClientError> {
    let mut headers = HeaderMap::new();

    headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));

    let token = config
        .csrf_token
        .as_ref()
        .map_or("", |token| token.expose_secret());
    let mut token_value = HeaderValue::from_str(token)
        .map_err(|e| ClientError::InvalidHeader(CSRF_HEADER, e.to_string()))?;
    token_value.set_sensitive(true);
    headers.insert(CSRF_HEADER, token_value);

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .build()?;

    Ok(client)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;

    #[test]
    fn test_rejects_token_with_newline() {
        let config = ClientConfig::new(Url::parse("http://localhost").unwrap())
            .with_csrf_token("bad\ntoken");
        assert!(matches!(
            build_http_client(&config),
            Err(ClientError::InvalidHeader(CSRF_HEADER, _))
        ));
    }

    #[test]
    fn test_builds_without_token() {
        let config = ClientConfig::new(Url::parse("http://localhost").unwrap());
        assert!(build_http_client(&config).is_ok());
    }
}
