//! Cartesia client configuration.

use crate::error::{Error, Result};

/// Configuration for the Cartesia client.
#[derive(Clone)]
pub struct CartesiaConfig {
    /// API key sent as `X-API-Key`.
    pub api_key: String,
    /// Base URL for the API.
    pub base_url: String,
    /// API version sent as `Cartesia-Version`.
    pub version: String,
    /// Request timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl CartesiaConfig {
    /// Environment variable holding the API key.
    pub const API_KEY_VAR: &'static str = "CARTESIA_API_KEY";
    /// Default Cartesia API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.cartesia.ai";
    /// Default API version.
    pub const DEFAULT_VERSION: &'static str = "2024-06-10";

    /// Creates a new configuration with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
            version: Self::DEFAULT_VERSION.to_owned(),
            timeout_secs: None,
        }
    }

    /// Creates configuration from the process environment.
    ///
    /// Only `CARTESIA_API_KEY` is read. An unset or empty value is an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the key is missing.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Creates configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the key is missing or empty.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        match lookup(Self::API_KEY_VAR) {
            Some(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(Error::config(format!(
                "Missing {} env var",
                Self::API_KEY_VAR
            ))),
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Sets the API version header value.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

impl std::fmt::Debug for CartesiaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartesiaConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
