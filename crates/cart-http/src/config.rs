//! # Cart API Configuration
//!
//! Where the cart service lives and how to reach it.
//! Loaded from environment variables or a TOML file.

use cart_core::CartError;
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Cart service configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartApiConfig {
    /// Service origin, e.g. `https://shop.example.com`
    pub base_url: String,

    /// Path serving `GET`/`POST` for the cart
    #[serde(default = "default_cart_path")]
    pub cart_path: String,

    /// Path triggering checkout
    #[serde(default = "default_checkout_path")]
    pub checkout_path: String,

    /// Bearer token sent with every request
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Per-request timeout in milliseconds; unset means none
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_cart_path() -> String {
    "/api/cart".to_string()
}

fn default_checkout_path() -> String {
    "/api/cart/checkout".to_string()
}

impl CartApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `CART_API_BASE_URL`
    ///
    /// Optional:
    /// - `CART_API_TOKEN`
    /// - `CART_API_TIMEOUT_MS`
    pub fn from_env() -> Result<Self, CartError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base_url = env::var("CART_API_BASE_URL").map_err(|_| {
            CartError::Configuration("CART_API_BASE_URL not set".to_string())
        })?;

        let timeout_ms = match env::var("CART_API_TIMEOUT_MS") {
            Ok(raw) => Some(raw.parse().map_err(|_| {
                CartError::Configuration(format!(
                    "CART_API_TIMEOUT_MS must be a whole number of milliseconds, got {raw:?}"
                ))
            })?),
            Err(_) => None,
        };

        let config = Self {
            auth_token: env::var("CART_API_TOKEN").ok(),
            timeout_ms,
            ..Self::new(base_url)
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML document
    pub fn from_toml(toml_str: &str) -> Result<Self, CartError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| CartError::Configuration(format!("Invalid cart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Create config with explicit base URL and default paths
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            cart_path: default_cart_path(),
            checkout_path: default_checkout_path(),
            auth_token: None,
            timeout_ms: None,
        }
    }

    /// Check URL and path shapes
    pub fn validate(&self) -> Result<(), CartError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(CartError::Configuration(
                "base_url must start with http:// or https://".to_string(),
            ));
        }

        if self.timeout_ms == Some(0) {
            return Err(CartError::Configuration(
                "timeout must be greater than zero".to_string(),
            ));
        }

        for path in [&self.cart_path, &self.checkout_path] {
            if !path.starts_with('/') {
                return Err(CartError::Configuration(format!(
                    "API path must start with '/': {path}"
                )));
            }
        }

        Ok(())
    }

    /// Full URL of the cart resource
    pub fn cart_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.cart_path)
    }

    /// Full URL of the checkout trigger
    pub fn checkout_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.checkout_path)
    }

    /// Get authorization header value, if a token is configured
    pub fn auth_header(&self) -> Option<String> {
        self.auth_token.as_ref().map(|token| format!("Bearer {token}"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Builder: set bearer token
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Builder: set request timeout.
    ///
    /// Sub-millisecond durations round up to 1ms.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.timeout_ms = Some(if millis == 0 && !timeout.is_zero() { 1 } else { millis });
        self
    }

    /// Builder: override resource paths
    pub fn with_paths(
        mut self,
        cart_path: impl Into<String>,
        checkout_path: impl Into<String>,
    ) -> Self {
        self.cart_path = cart_path.into();
        self.checkout_path = checkout_path.into();
        self
    }
}
