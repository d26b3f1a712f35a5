//! # cart-http
//!
//! HTTP gateway to the storefront cart service for shelf-cart.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cart_core::CartProvider;
//! use cart_http::HttpCartGateway;
//! use std::sync::Arc;
//!
//! // Create gateway from environment
//! let gateway = HttpCartGateway::from_env()?;
//!
//! // Mount the cart and read it
//! let provider = CartProvider::mount(Arc::new(gateway)).await;
//! let state = provider.handle().state()?;
//! ```

pub mod config;
pub mod gateway;

// Re-exports
pub use config::CartApiConfig;
pub use gateway::HttpCartGateway;
