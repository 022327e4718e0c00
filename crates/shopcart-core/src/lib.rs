//! # shopcart-core: Pure Cart Logic
//!
//! The cart reducer and its supporting types. Every transition is a pure
//! function of `(state, action)` and returns a new [`CartState`]; the input
//! state is never touched.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        shopcart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    View layer (out of scope)                    │   │
//! │  │     Product list ──► Cart drawer ──► Cart total badge           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ add / remove / update_quantity         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 shopcart-store (CartStore)                      │   │
//! │  │          mutex-guarded current state + listeners                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartState::apply                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopcart-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ CartState │  │  item ids │  │   │
//! │  │   │ CartItem  │  │ coercion  │  │CartAction │  │ coercion  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │        NO I/O • NO LOCKS • PURE FUNCTIONS                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product input records and cart item records
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart state, actions and the reducer
//! - [`error`] - Domain error types
//! - [`validation`] - Identifier validation and lenient numeric coercion
//!
//! ## Example Usage
//!
//! ```rust
//! use shopcart_core::{CartState, Money, Product};
//!
//! let tee = Product::new("tee").with_price(10);
//! let mug = Product::new("mug").with_price(5);
//!
//! let cart = CartState::new()
//!     .add(&tee).unwrap()
//!     .add(&tee).unwrap()
//!     .add(&mug).unwrap();
//!
//! assert_eq!(cart.get("tee").unwrap().quantity, 2);
//! assert_eq!(cart.total(), Money::from_cents(2500));
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{ActionKind, CartAction, CartState, CartTotals, QuantityUpdate};
pub use error::{CartError, CartResult, ValidationError};
pub use money::Money;
pub use types::{CartItem, Product};

/// Wire name of the item identifier field on product records.
pub const ID_FIELD: &str = "_id";

/// Attribute holding the unit price of a product, in major currency units.
pub const PRICE_FIELD: &str = "price";

/// Attribute holding the cart quantity of an item record.
pub const QUANTITY_FIELD: &str = "quantity";
