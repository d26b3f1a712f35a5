//! # HTTP Cart Gateway
//!
//! `CartGateway` over the storefront's JSON cart API.

use crate::config::CartApiConfig;
use async_trait::async_trait;
use cart_core::{
    decode_lines, CartError, CartGateway, CartLine, CartResult, ProductId, UpdateRequest,
};
use reqwest::{Client, RequestBuilder};
use tracing::{debug, error, instrument};

/// Cart service reached over HTTP
///
/// One attempt per call. Any non-2xx status is an error; success bodies
/// of update and checkout are ignored.
pub struct HttpCartGateway {
    config: CartApiConfig,
    client: Client,
}

impl HttpCartGateway {
    /// Create a gateway for the given service
    pub fn new(config: CartApiConfig) -> CartResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            CartError::Configuration(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> CartResult<Self> {
        Self::new(CartApiConfig::from_env()?)
    }

    pub fn config(&self) -> &CartApiConfig {
        &self.config
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.auth_header() {
            Some(value) => request.header("Authorization", value),
            None => request,
        }
    }

    /// Send a request and return the body of a 2xx response
    async fn execute(&self, request: RequestBuilder) -> CartResult<String> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| CartError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CartError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Cart API error: status={}, body={}", status, body);
            return Err(CartError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl CartGateway for HttpCartGateway {
    #[instrument(skip(self))]
    async fn fetch_lines(&self) -> CartResult<Vec<CartLine>> {
        let url = self.config.cart_url();
        debug!("Fetching cart from {}", url);

        let body = self.execute(self.client.get(&url)).await?;
        let lines = decode_lines(body.as_bytes())?;

        debug!("Decoded {} cart lines", lines.len());
        Ok(lines)
    }

    #[instrument(skip(self))]
    async fn update_item(&self, product_id: ProductId, amount: i64) -> CartResult<()> {
        let url = self.config.cart_url();
        let payload = UpdateRequest {
            book_id: product_id,
            amount,
        };

        self.execute(self.client.post(&url).json(&payload)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn checkout(&self) -> CartResult<()> {
        let url = self.config.checkout_url();
        self.execute(self.client.get(&url)).await?;
        Ok(())
    }

    fn gateway_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = HttpCartGateway::new(CartApiConfig::new("localhost:3000"));
        assert!(matches!(result, Err(CartError::Configuration(_))));
    }

    #[test]
    fn test_new_rejects_zero_timeout() {
        let config = CartApiConfig::new("http://localhost:3000")
            .with_timeout(std::time::Duration::ZERO);
        assert!(matches!(
            HttpCartGateway::new(config),
            Err(CartError::Configuration(_))
        ));
    }

    #[test]
    fn test_gateway_name() {
        let gateway = HttpCartGateway::new(CartApiConfig::new("http://localhost:3000")).unwrap();
        assert_eq!(gateway.gateway_name(), "http");
        assert_eq!(gateway.config().cart_url(), "http://localhost:3000/api/cart");
    }
}
