//! # Cart Provider
//!
//! Scopes a [`CartStore`] and hands out [`CartHandle`]s to consumers.
//! A handle only reaches the store while the provider (or a store `Arc`
//! it lent out) is alive; any other access is a [`MissingProviderError`].

use crate::error::MissingProviderError;
use crate::gateway::BoxedCartGateway;
use crate::line::CartState;
use crate::store::CartStore;
use std::sync::{Arc, Weak};

/// Owner of the store for the lifetime of a UI scope
pub struct CartProvider {
    store: Arc<CartStore>,
}

impl CartProvider {
    pub fn new(store: Arc<CartStore>) -> Self {
        Self { store }
    }

    /// Build the store and run the initial fetch
    pub async fn mount(gateway: BoxedCartGateway) -> Self {
        Self::new(CartStore::initialize(gateway).await)
    }

    /// Issue a handle bound to this provider
    pub fn handle(&self) -> CartHandle {
        CartHandle {
            store: Some(Arc::downgrade(&self.store)),
        }
    }

    pub fn store(&self) -> &Arc<CartStore> {
        &self.store
    }
}

/// Consumer-side access to the cart.
///
/// `CartHandle::default()` is a handle with no provider.
#[derive(Debug, Clone, Default)]
pub struct CartHandle {
    store: Option<Weak<CartStore>>,
}

impl CartHandle {
    /// A handle that was never attached to a provider
    pub fn detached() -> Self {
        Self::default()
    }

    /// Resolve the store, failing outside a provider scope
    pub fn store(&self) -> Result<Arc<CartStore>, MissingProviderError> {
        self.store
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or(MissingProviderError)
    }

    /// Read the current snapshot
    pub fn state(&self) -> Result<Arc<CartState>, MissingProviderError> {
        Ok(self.store()?.snapshot())
    }

    pub fn is_attached(&self) -> bool {
        self.store().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CartResult;
    use crate::gateway::CartGateway;
    use crate::line::{CartLine, ProductId};
    use async_trait::async_trait;

    struct StaticGateway;

    #[async_trait]
    impl CartGateway for StaticGateway {
        async fn fetch_lines(&self) -> CartResult<Vec<CartLine>> {
            Ok(vec![CartLine::new(1, "Go", "9.99", 2)])
        }

        async fn update_item(&self, _product_id: ProductId, _amount: i64) -> CartResult<()> {
            Ok(())
        }

        async fn checkout(&self) -> CartResult<()> {
            Ok(())
        }

        fn gateway_name(&self) -> &'static str {
            "static"
        }
    }

    #[test]
    fn test_detached_handle_is_missing_provider() {
        let handle = CartHandle::detached();
        assert_eq!(handle.state().unwrap_err(), MissingProviderError);
        assert!(!handle.is_attached());
    }

    #[tokio::test]
    async fn test_mount_loads_cart() {
        let provider = CartProvider::mount(Arc::new(StaticGateway)).await;
        let state = provider.handle().state().unwrap();

        assert_eq!(state.lines, vec![CartLine::new(1, "Go", "9.99", 2)]);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_handle_fails_after_provider_dropped() {
        let provider = CartProvider::new(Arc::new(CartStore::new(Arc::new(StaticGateway))));
        let handle = provider.handle();
        assert!(handle.is_attached());

        drop(provider);

        assert!(matches!(handle.store(), Err(MissingProviderError)));
    }
}
