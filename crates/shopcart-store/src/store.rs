//! # Cart Store
//!
//! Holds the current cart and runs every transition through the reducer.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartStore::dispatch                                  │
//! │                                                                         │
//! │  1. lock current ──► state.apply(action)                               │
//! │        │                   │                                            │
//! │        │                   ├── Err  ──► unlock, return error            │
//! │        │                   ├── same ──► unlock, nothing to report       │
//! │        │                   └── new  ──► swap Arc, revision += 1         │
//! │        ▼                                                                │
//! │  2. unlock                                                              │
//! │        ▼                                                                │
//! │  3. listeners(&CartChange)                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! Revisions are assigned under the lock, so they are strictly increasing
//! in commit order. With several writer threads, listeners may be called
//! out of revision order; compare `CartChange::revision` when that matters.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use shopcart_core::{
    ActionKind, CartAction, CartItem, CartResult, CartState, CartTotals, Money, Product,
    QuantityUpdate,
};
use tracing::{debug, trace, warn};

use crate::listeners::{CartChange, ListenerRegistry, SubscriptionId};

/// Shared handle to one cart.
///
/// Cloning is cheap and every clone addresses the same cart and listeners.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    current: Mutex<Published>,
    listeners: ListenerRegistry,
}

/// The last committed state and its revision.
#[derive(Debug, Default)]
struct Published {
    state: Arc<CartState>,
    revision: u64,
}

impl Published {
    fn commit(
        &mut self,
        next: CartState,
        kind: ActionKind,
        item_id: Option<String>,
    ) -> CartChange {
        self.revision += 1;
        self.state = Arc::new(next);

        CartChange {
            revision: self.revision,
            kind,
            item_id,
            totals: self.state.totals(),
            at: Utc::now(),
            state: Arc::clone(&self.state),
        }
    }
}

impl CartStore {
    /// Creates a store holding an empty cart.
    pub fn new() -> Self {
        CartStore::default()
    }

    /// Creates a store seeded with an existing cart (revision 0).
    pub fn with_state(state: CartState) -> Self {
        CartStore {
            inner: Arc::new(Inner {
                current: Mutex::new(Published {
                    state: Arc::new(state),
                    revision: 0,
                }),
                listeners: ListenerRegistry::default(),
            }),
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Adds one unit of `product`.
    pub fn add(&self, product: &Product) -> CartResult<()> {
        self.dispatch(CartAction::AddItem(product.clone()))
    }

    /// Removes `product` entirely. Only its identifier is used.
    pub fn remove(&self, product: &Product) -> CartResult<()> {
        self.dispatch(CartAction::RemoveItem(Product::new(product.id.clone())))
    }

    /// Shifts the quantity of `id` by `delta`; the item is removed at ≤ 0.
    pub fn update_quantity(&self, id: &str, delta: i64) -> CartResult<()> {
        self.dispatch(CartAction::UpdateItemQuantity(QuantityUpdate::new(id, delta)))
    }

    /// Runs an action through the reducer and publishes the result.
    ///
    /// ## Returns
    /// - `Ok(())` when the action was valid, whether or not it changed the cart
    /// - `Err(CartError)` when it was rejected; the cart is untouched
    pub fn dispatch(&self, action: CartAction) -> CartResult<()> {
        let kind = action.kind();
        let item_id = action.item_id().to_owned();
        debug!(action = %kind, item_id = %item_id, "cart dispatch");

        let change = {
            let mut current = self.lock();
            let next = match current.state.apply(&action) {
                Ok(next) => next,
                Err(err) => {
                    warn!(
                        action = %kind,
                        item_id = %item_id,
                        error = %err,
                        "cart action rejected"
                    );
                    return Err(err);
                }
            };

            if next == *current.state {
                trace!(action = %kind, item_id = %item_id, "cart unchanged");
                return Ok(());
            }

            current.commit(next, kind, Some(item_id))
        };

        self.inner.listeners.notify(&change);
        Ok(())
    }

    /// Empties the cart. Listeners are only told when there was something
    /// to clear.
    pub fn clear(&self) {
        let change = {
            let mut current = self.lock();
            if current.state.is_empty() {
                return;
            }
            debug!(items = current.state.item_count(), "clearing cart");
            current.commit(CartState::new(), ActionKind::Clear, None)
        };

        self.inner.listeners.notify(&change);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current cart snapshot. Later transitions do not affect it.
    pub fn snapshot(&self) -> Arc<CartState> {
        Arc::clone(&self.lock().state)
    }

    /// Item records in first-insertion order.
    pub fn get_cart_items(&self) -> Vec<CartItem> {
        self.snapshot().to_items()
    }

    /// Sum of `price × quantity` over the cart.
    pub fn get_cart_total(&self) -> Money {
        self.snapshot().total()
    }

    pub fn totals(&self) -> CartTotals {
        self.snapshot().totals()
    }

    /// Number of committed state changes so far.
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Registers a listener called after each state change.
    ///
    /// The listener runs on the thread that made the change, after the
    /// store lock is released, so it may freely read from or write to the
    /// store.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&CartChange) + Send + Sync + 'static,
    {
        let id = self.inner.listeners.subscribe(Arc::new(listener));
        debug!(subscription = ?id, "cart listener registered");
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.listeners.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.len()
    }

    // `Published` is only ever replaced wholesale in `commit`, so a poisoned
    // lock still guards a consistent state.
    fn lock(&self) -> MutexGuard<'_, Published> {
        self.inner
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
