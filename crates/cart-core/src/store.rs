//! # Cart Store
//!
//! Holds the current [`CartState`] and mediates every read and write
//! against the remote cart service.
//!
//! Each change publishes a fresh `Arc<CartState>`. Observers registered
//! with [`CartStore::subscribe`] are called synchronously with the new
//! snapshot; async consumers can hold a [`watch::Receiver`] instead.
//!
//! Remote operations are serialized: each waits its turn on a FIFO lock
//! before raising `loading`, so a slow response can never overwrite the
//! result of an operation issued after it. `add_local` and reads do not
//! wait on that lock.

use crate::error::{CartError, CartFailure};
use crate::gateway::BoxedCartGateway;
use crate::line::{CartLine, CartState, ProductId};
use chrono::Utc;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{watch, Mutex as AsyncMutex};
use tracing::{debug, info, instrument, warn};

/// Receives every snapshot the store publishes.
///
/// Called on the publishing thread, in publish order; implementations
/// must not call back into the store synchronously.
pub trait CartObserver: Send + Sync {
    fn on_change(&self, state: &Arc<CartState>);
}

impl<F> CartObserver for F
where
    F: Fn(&Arc<CartState>) + Send + Sync,
{
    fn on_change(&self, state: &Arc<CartState>) {
        self(state)
    }
}

/// Token returned by [`CartStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Arc<dyn CartObserver>)>,
}

pub struct CartStore {
    gateway: BoxedCartGateway,
    state: watch::Sender<Arc<CartState>>,
    observers: Mutex<Observers>,
    /// Held across swap and fan-out so observers see snapshots in publish order
    publishing: Mutex<()>,
    operations: AsyncMutex<()>,
}

impl CartStore {
    /// Create an empty store. Nothing is fetched until [`refresh`](Self::refresh).
    pub fn new(gateway: BoxedCartGateway) -> Self {
        let (state, _) = watch::channel(Arc::new(CartState::default()));
        Self {
            gateway,
            state,
            observers: Mutex::new(Observers::default()),
            publishing: Mutex::new(()),
            operations: AsyncMutex::new(()),
        }
    }

    /// Create a store and load the cart once
    pub async fn initialize(gateway: BoxedCartGateway) -> Arc<Self> {
        let store = Arc::new(Self::new(gateway));
        store.refresh().await;
        store
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<CartState> {
        Arc::clone(&*self.state.borrow())
    }

    /// Receiver that always holds the latest snapshot
    pub fn watch(&self) -> watch::Receiver<Arc<CartState>> {
        self.state.subscribe()
    }

    /// Register an observer for every future snapshot
    pub fn subscribe(&self, observer: impl CartObserver + 'static) -> SubscriptionId {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(observers.next_id);
        observers.next_id += 1;
        let observer: Arc<dyn CartObserver> = Arc::new(observer);
        observers.entries.push((id, observer));
        id
    }

    /// Remove an observer. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = observers.entries.len();
        observers.entries.retain(|(entry, _)| *entry != id);
        observers.entries.len() != before
    }

    /// Replace `lines` with the service's cart.
    ///
    /// Clears `error` on success; records [`CartFailure::Fetch`] otherwise.
    #[instrument(skip(self), fields(gateway = self.gateway.gateway_name()))]
    pub async fn refresh(&self) {
        let _turn = self.operations.lock().await;
        let _loading = LoadingGuard::acquire(self);
        self.sync_lines().await;
    }

    /// Send a quantity change, then re-read the cart.
    ///
    /// Local quantities are never touched directly. On failure `lines` is
    /// left as it was and [`CartFailure::Update`] is recorded.
    #[instrument(skip(self), fields(gateway = self.gateway.gateway_name()))]
    pub async fn update_item(&self, product_id: ProductId, amount: i64) {
        let _turn = self.operations.lock().await;
        let _loading = LoadingGuard::acquire(self);

        match self.gateway.update_item(product_id, amount).await {
            Ok(()) => {
                debug!("update accepted, re-reading cart");
                self.sync_lines().await;
            }
            Err(err) => self.absorb(CartFailure::Update, &err),
        }
    }

    /// Check out and empty the cart.
    ///
    /// The only remote operation that changes `lines` without re-reading.
    /// A previously recorded error is left in place.
    #[instrument(skip(self), fields(gateway = self.gateway.gateway_name()))]
    pub async fn checkout(&self) {
        let _turn = self.operations.lock().await;
        let _loading = LoadingGuard::acquire(self);

        match self.gateway.checkout().await {
            Ok(()) => {
                info!("checkout complete");
                self.publish(|state| state.lines.clear());
            }
            Err(err) => self.absorb(CartFailure::Checkout, &err),
        }
    }

    /// Merge a line locally without contacting the service.
    ///
    /// See [`CartState::add_local`]. Overwritten by the next fetch.
    pub fn add_local(&self, item: CartLine) {
        debug!(product_id = item.id, "local add");
        self.publish(|state| state.add_local(item));
    }

    async fn sync_lines(&self) {
        match self.gateway.fetch_lines().await {
            Ok(lines) => {
                info!(lines = lines.len(), "cart refreshed");
                self.publish(|state| {
                    state.lines = lines;
                    state.error = None;
                    state.synced_at = Some(Utc::now());
                });
            }
            Err(err) => self.absorb(CartFailure::Fetch, &err),
        }
    }

    fn absorb(&self, failure: CartFailure, err: &CartError) {
        warn!(error = %err, retryable = err.is_retryable(), "{}", failure);
        self.publish(|state| state.error = Some(failure));
    }

    fn publish(&self, mutate: impl FnOnce(&mut CartState)) {
        let _order = self.publishing.lock().unwrap_or_else(PoisonError::into_inner);

        let mut published: Arc<CartState> = Arc::default();
        self.state.send_modify(|current| {
            let mut next = CartState::clone(current);
            mutate(&mut next);
            *current = Arc::new(next);
            published = Arc::clone(current);
        });

        let observers: Vec<Arc<dyn CartObserver>> = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer.on_change(&published);
        }
    }
}

/// Holds `loading` high for its lifetime, including when the owning
/// future is dropped mid-flight.
struct LoadingGuard<'a> {
    store: &'a CartStore,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(store: &'a CartStore) -> Self {
        store.publish(|state| state.loading = true);
        Self { store }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.publish(|state| state.loading = false);
    }
}
