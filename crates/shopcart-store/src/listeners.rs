//! Listener registry and the change events it fans out.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use shopcart_core::{ActionKind, CartState, CartTotals};
use tracing::trace;

/// A callback invoked after every state-changing transition.
pub type Listener = Arc<dyn Fn(&CartChange) + Send + Sync>;

/// Handle returned by [`crate::CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SubscriptionId(u64);

/// A change notification.
///
/// `state` is the cart as it was right after this change was applied. The
/// JSON form omits it and carries the `totals` summary instead.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartChange {
    /// Store revision produced by this change (first change is 1).
    pub revision: u64,
    pub kind: ActionKind,
    /// Target identifier; `None` for a clear.
    pub item_id: Option<String>,
    pub totals: CartTotals,
    pub at: DateTime<Utc>,
    #[serde(skip)]
    pub state: Arc<CartState>,
}

/// Registered listeners, in subscription order.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

impl ListenerRegistry {
    pub(crate) fn subscribe(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.lock().push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    /// Calls every listener with `change`.
    ///
    /// The list is copied first so listeners may subscribe, unsubscribe or
    /// dispatch from inside the callback.
    pub(crate) fn notify(&self, change: &CartChange) {
        let listeners: Vec<Listener> = self
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        trace!(
            revision = change.revision,
            listeners = listeners.len(),
            "notifying cart listeners"
        );

        for listener in listeners {
            listener(change);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, Listener)>> {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}
