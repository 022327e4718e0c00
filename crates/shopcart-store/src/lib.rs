//! # shopcart-store
//!
//! The single-writer cart handle used by view code.
//!
//! ## Why a Handle Instead of a Global?
//! One [`CartStore`] is built when the application starts and passed to
//! every component that needs it. Cloning the handle shares the same cart.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Architecture                                   │
//! │                                                                         │
//! │   app start:  let store = CartStore::new();                            │
//! │                    │                                                    │
//! │        ┌───────────┼──────────────────┐                                 │
//! │        ▼           ▼                  ▼                                 │
//! │  ProductCard   CartDrawer        TotalBadge                             │
//! │  store.add()   store.subscribe() store.get_cart_total()                 │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Writes are serialised by a Mutex around the current state           │
//! │  • Reads clone an Arc snapshot and never block a writer for long       │
//! │  • Listeners are called after the lock is released                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::Arc;
//!
//! use shopcart_core::{Money, Product};
//! use shopcart_store::CartStore;
//!
//! let store = CartStore::new();
//! let seen = Arc::new(AtomicU64::new(0));
//!
//! let counter = Arc::clone(&seen);
//! store.subscribe(move |change| counter.store(change.revision, Ordering::SeqCst));
//!
//! store.add(&Product::new("tee").with_price(10)).unwrap();
//! store.update_quantity("tee", 1).unwrap();
//!
//! assert_eq!(store.get_cart_total(), Money::from_cents(2000));
//! assert_eq!(seen.load(Ordering::SeqCst), 2);
//! ```

mod listeners;
mod store;

pub use listeners::{CartChange, Listener, SubscriptionId};
pub use store::CartStore;
