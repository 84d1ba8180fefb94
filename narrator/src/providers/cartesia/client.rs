//! Cartesia API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::error::{Result, TtsError};

use super::config::CartesiaConfig;

/// Cartesia API client.
#[derive(Debug, Clone)]
pub struct Cartesia {
    pub(crate) config: Arc<CartesiaConfig>,
    pub(crate) client: Client,
}

impl Cartesia {
    /// Provider name used in logs and errors.
    pub const PROVIDER: &'static str = "cartesia";

    /// Create a new Cartesia client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an auth error for an empty API key, or an internal error if
    /// the HTTP client cannot be built.
    pub fn new(config: CartesiaConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(TtsError::auth(Self::PROVIDER, "API key is required").into());
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| TtsError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Build the byte-synthesis URL.
    pub(crate) fn bytes_url(&self) -> String {
        format!("{}/tts/bytes", self.config.base_url)
    }

    /// Build a JSON POST request with the auth and version headers.
    pub(crate) fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("Cartesia-Version", &self.config.version)
            .header("X-API-Key", &self.config.api_key)
            .header("Content-Type", "application/json")
    }

    /// Turn a rejected response into an error.
    ///
    /// The body is kept verbatim; Cartesia returns plain diagnostic text.
    pub(crate) fn parse_error(status: u16, body: &str) -> TtsError {
        TtsError::http_status(status, body.trim_end().to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn rejects_empty_api_key() {
        let err = Cartesia::new(CartesiaConfig::new("")).unwrap_err();
        assert!(matches!(err, Error::Tts(TtsError::Auth { .. })));
    }

    #[test]
    fn bytes_url_joins_base() {
        let client =
            Cartesia::new(CartesiaConfig::new("k").with_base_url("http://localhost:1234"))
                .unwrap();
        assert_eq!(client.bytes_url(), "http://localhost:1234/tts/bytes");
    }

    #[test]
    fn parse_error_keeps_status_and_body() {
        let err = Cartesia::parse_error(401, "Invalid API key\n");
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "HTTP 401: Invalid API key");
    }
}
