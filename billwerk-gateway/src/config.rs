use std::time::Duration;

use bon::Builder;
use url::Url;

use crate::errors::{Error, Result};

const TEST_API_ENDPOINT: &str = "https://api.test.reepay.com/v1";
const LIVE_API_ENDPOINT: &str = "https://api.reepay.com/v1";
const TEST_CHECKOUT_ENDPOINT: &str = "https://checkout-api.test.reepay.com/v1";
const LIVE_CHECKOUT_ENDPOINT: &str = "https://checkout-api.reepay.com/v1";

/// Gateway configuration.
///
/// Test mode is on by default, so a bare config never talks to the live API.
#[derive(Builder, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Private API key, used as the HTTP Basic user name.
    #[builder(into, default)]
    pub api_key: String,
    /// Use the Billwerk test environment.
    #[builder(default = true)]
    pub test_mode: bool,
    /// Default accept URL for checkout sessions.
    pub return_url: Option<Url>,
    /// Default cancel URL for checkout sessions.
    pub cancel_url: Option<Url>,
    /// Request timeout of the HTTP client.
    pub timeout: Option<Duration>,
    /// Override of the REST API base URL.
    pub api_endpoint: Option<Url>,
    /// Override of the checkout API base URL.
    pub checkout_endpoint: Option<Url>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig::builder().build()
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("test_mode", &self.test_mode)
            .field("return_url", &self.return_url)
            .field("cancel_url", &self.cancel_url)
            .field("timeout", &self.timeout)
            .field("api_endpoint", &self.api_endpoint)
            .field("checkout_endpoint", &self.checkout_endpoint)
            .finish()
    }
}

impl GatewayConfig {
    /// Read the config from `BILLWERK_API_KEY` and `BILLWERK_TEST_MODE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, e.g. a parsed config file.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("BILLWERK_API_KEY").unwrap_or_default();
        let test_mode = match lookup("BILLWERK_TEST_MODE") {
            Some(value) => parse_flag(&value).ok_or_else(|| {
                Error::InvalidConfig(format!("BILLWERK_TEST_MODE is not a boolean: {value:?}"))
            })?,
            None => true,
        };

        Ok(GatewayConfig::builder()
            .api_key(api_key)
            .test_mode(test_mode)
            .build())
    }

    /// Base URL of the REST API.
    pub fn endpoint(&self) -> Result<Url> {
        match &self.api_endpoint {
            Some(url) => Ok(url.clone()),
            None if self.test_mode => Ok(Url::parse(TEST_API_ENDPOINT)?),
            None => Ok(Url::parse(LIVE_API_ENDPOINT)?),
        }
    }

    /// Base URL of the checkout API.
    pub fn checkout_endpoint(&self) -> Result<Url> {
        match &self.checkout_endpoint {
            Some(url) => Ok(url.clone()),
            None if self.test_mode => Ok(Url::parse(TEST_CHECKOUT_ENDPOINT)?),
            None => Ok(Url::parse(LIVE_CHECKOUT_ENDPOINT)?),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
