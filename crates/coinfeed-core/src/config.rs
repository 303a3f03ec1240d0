//! Adapter configuration.
//!
//! Adapters take their settings as values. Reading the process environment
//! happens here and only here, so the composition layer decides when it does.

use crate::ValidationError;

/// Environment variable holding the Coinalyze API key.
pub const COINALYZE_API_KEY_ENV: &str = "COINALYZE";

pub const COINALYZE_BASE_URL: &str = "https://api.coinalyze.net";
pub const BINANCE_BASE_URL: &str = "https://api.binance.com";
pub const COINBASE_BASE_URL: &str = "https://api.exchange.coinbase.com";

/// Settings for [`crate::CoinalyzeAdapter`].
#[derive(Clone, PartialEq, Eq)]
pub struct CoinalyzeConfig {
    api_key: String,
    base_url: String,
}

impl CoinalyzeConfig {
    /// Fails when the key is empty or whitespace.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ValidationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ValidationError::MissingCredential {
                name: COINALYZE_API_KEY_ENV,
            });
        }

        Ok(Self {
            api_key,
            base_url: String::from(COINALYZE_BASE_URL),
        })
    }

    /// Read the key from `COINALYZE`.
    pub fn from_env() -> Result<Self, ValidationError> {
        let api_key = std::env::var(COINALYZE_API_KEY_ENV).unwrap_or_default();
        Self::new(api_key)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(base_url.into());
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for CoinalyzeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinalyzeConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

pub(crate) fn trim_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_owned()
}
