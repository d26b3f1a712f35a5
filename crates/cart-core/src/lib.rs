//! # cart-core
//!
//! Client-side cart state for the shelf-cart storefront.
//!
//! This crate provides:
//! - `CartStore`, the snapshot cache mediating refresh, update and checkout
//! - `CartGateway` trait for talking to the remote cart service
//! - `CartProvider` and `CartHandle` for scoped access
//! - `CartLine` and `CartState`, the published snapshot types
//! - Wire types and the decode step for the service's JSON
//! - `CartError`, `CartFailure`, `DecodeError` and `MissingProviderError`
//!
//! ## Example
//!
//! ```rust,ignore
//! use cart_core::{CartProvider, CartState};
//! use std::sync::Arc;
//!
//! let provider = CartProvider::mount(Arc::new(gateway)).await;
//! let handle = provider.handle();
//!
//! handle.store()?.subscribe(|state: &Arc<CartState>| render(state));
//! handle.store()?.update_item(42, 1).await;
//! ```

pub mod error;
pub mod gateway;
pub mod line;
pub mod provider;
pub mod store;
pub mod wire;

// Re-exports for convenience
pub use error::{CartError, CartFailure, CartResult, DecodeError, MissingProviderError};
pub use gateway::{BoxedCartGateway, CartGateway};
pub use line::{CartLine, CartState, ProductId};
pub use provider::{CartHandle, CartProvider};
pub use store::{CartObserver, CartStore, SubscriptionId};
pub use wire::{decode_lines, RemoteCart, RemoteItem, UpdateRequest};
