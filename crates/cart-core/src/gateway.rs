//! # Cart Gateway Trait
//!
//! The seam between the store and the remote cart service.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CartGateway (trait)                     │
//! │  ├── fetch_lines()                                          │
//! │  ├── update_item()                                          │
//! │  └── checkout()                                             │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                ┌───────────┴───────────┐
//!                │                       │
//!        ┌───────┴───────┐       ┌───────┴───────┐
//!        │HttpCartGateway│       │  test doubles │
//!        │  (cart-http)  │       │               │
//!        └───────────────┘       └───────────────┘
//! ```

use crate::error::CartResult;
use crate::line::{CartLine, ProductId};
use async_trait::async_trait;
use std::sync::Arc;

/// Remote cart service operations.
///
/// The service is the source of truth; implementations make exactly one
/// attempt per call and report any failure as a [`crate::CartError`].
#[async_trait]
pub trait CartGateway: Send + Sync {
    /// Read the authoritative cart, already decoded into lines.
    async fn fetch_lines(&self) -> CartResult<Vec<CartLine>>;

    /// Send a quantity change for a product.
    ///
    /// # Arguments
    /// * `product_id` - Product to change (not validated locally)
    /// * `amount` - Delta or absolute quantity, as the service defines it
    async fn update_item(&self, product_id: ProductId, amount: i64) -> CartResult<()>;

    /// Trigger checkout of the current cart.
    async fn checkout(&self) -> CartResult<()>;

    /// Gateway name (for logging).
    fn gateway_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedCartGateway = Arc<dyn CartGateway>;
