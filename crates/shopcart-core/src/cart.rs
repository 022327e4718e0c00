//! # Cart State
//!
//! The cart reducer: one state shape, three transitions.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Transitions                               │
//! │                                                                         │
//! │  Action                   Transition             Effect                 │
//! │  ──────                   ──────────             ──────                 │
//! │                                                                         │
//! │  ADD_ITEM ──────────────► add(product) ────────► qty + 1 (or insert 1) │
//! │                                                                         │
//! │  REMOVE_ITEM ───────────► remove(product) ─────► drop id (absent: no-op)│
//! │                                                                         │
//! │  UPDATE_ITEM_QUANTITY ──► update_quantity() ───► qty + delta,          │
//! │                                                  drop id when ≤ 0       │
//! │                                                                         │
//! │  NOTE: every transition borrows the current state and returns a new   │
//! │        one. The input is never mutated.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `all_items` holds each identifier once, in first-insertion order
//! - `all_items` as a set equals the key set of `items_by_id`
//! - every stored item has `quantity >= 1`

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CartResult;
use crate::money::Money;
use crate::types::{CartItem, Product};
use crate::validation::{deserialize_item_id, deserialize_quantity, validate_item_id};

// =============================================================================
// Actions
// =============================================================================

/// A named cart transition.
///
/// Serialized with the action names the web UI dispatches:
///
/// ```json
/// {"type": "ADD_ITEM", "payload": {"_id": "tee", "price": 10}}
/// {"type": "REMOVE_ITEM", "payload": {"_id": "tee"}}
/// {"type": "UPDATE_ITEM_QUANTITY", "payload": {"id": "tee", "quantity": -1}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Add one unit of a product.
    AddItem(Product),
    /// Remove a product entirely. Only the identifier is read.
    RemoveItem(Product),
    /// Shift a quantity by a signed delta.
    UpdateItemQuantity(QuantityUpdate),
}

impl CartAction {
    /// Returns the action kind.
    pub fn kind(&self) -> ActionKind {
        match self {
            CartAction::AddItem(_) => ActionKind::Add,
            CartAction::RemoveItem(_) => ActionKind::Remove,
            CartAction::UpdateItemQuantity(_) => ActionKind::UpdateQuantity,
        }
    }

    /// Returns the identifier the action targets.
    pub fn item_id(&self) -> &str {
        match self {
            CartAction::AddItem(product) | CartAction::RemoveItem(product) => &product.id,
            CartAction::UpdateItemQuantity(update) => &update.id,
        }
    }
}

/// Payload of [`CartAction::UpdateItemQuantity`].
///
/// The delta travels as `quantity` and accepts any JSON value; non-numeric
/// input coerces to 0. The `id` is read as loosely as a product `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    #[serde(default, deserialize_with = "deserialize_item_id")]
    pub id: String,
    #[serde(rename = "quantity", default, deserialize_with = "deserialize_quantity")]
    pub delta: i64,
}

impl QuantityUpdate {
    pub fn new(id: impl Into<String>, delta: i64) -> Self {
        QuantityUpdate {
            id: id.into(),
            delta,
        }
    }
}

/// Kind of change reported to cart listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Add,
    Remove,
    UpdateQuantity,
    Clear,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Add => "add",
            ActionKind::Remove => "remove",
            ActionKind::UpdateQuantity => "update_quantity",
            ActionKind::Clear => "clear",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// The cart: item records by identifier plus their insertion order.
///
/// Fields are private so the invariants above can only be changed through
/// the transitions.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items_by_id: HashMap<String, CartItem>,
    all_items: Vec<String>,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Applies an action, returning the next state.
    ///
    /// ## Returns
    /// - `Ok(next)` on success (possibly structurally equal to `self`)
    /// - `Err(CartError::Validation)` when the action has no usable identifier
    pub fn apply(&self, action: &CartAction) -> CartResult<CartState> {
        match action {
            CartAction::AddItem(product) => self.add(product),
            CartAction::RemoveItem(product) => self.remove(product),
            CartAction::UpdateItemQuantity(update) => {
                self.update_quantity(&update.id, update.delta)
            }
        }
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product not in cart: inserted with quantity 1
    /// - Product already in cart: quantity + 1, attributes replaced by the
    ///   incoming product's
    pub fn add(&self, product: &Product) -> CartResult<CartState> {
        validate_item_id(&product.id)?;

        let quantity = self
            .items_by_id
            .get(&product.id)
            .map_or(0, |item| item.quantity)
            .saturating_add(1);

        let mut next = self.clone();
        next.upsert(CartItem::from_product(product, quantity));
        Ok(next)
    }

    /// Removes a product entirely. An absent identifier is a no-op.
    pub fn remove(&self, product: &Product) -> CartResult<CartState> {
        self.remove_id(&product.id)
    }

    /// Removes an identifier entirely. An absent identifier is a no-op.
    pub fn remove_id(&self, id: &str) -> CartResult<CartState> {
        validate_item_id(id)?;
        Ok(self.without(id))
    }

    /// Shifts an item's quantity by `delta`.
    ///
    /// ## Behavior
    /// - New quantity ≤ 0: the item is removed (same as [`CartState::remove_id`])
    /// - Identifier absent and delta > 0: a bare item with quantity = delta
    /// - Otherwise: quantity updated, attributes preserved
    pub fn update_quantity(&self, id: &str, delta: i64) -> CartResult<CartState> {
        validate_item_id(id)?;

        let existing = self.items_by_id.get(id);
        let quantity = existing
            .map_or(0, |item| item.quantity)
            .saturating_add(delta);

        if quantity <= 0 {
            return Ok(self.without(id));
        }

        let item = match existing {
            Some(item) => CartItem {
                quantity,
                ..item.clone()
            },
            None => CartItem::bare(id, quantity),
        };

        let mut next = self.clone();
        next.upsert(item);
        Ok(next)
    }

    // =========================================================================
    // Derived Queries
    // =========================================================================

    /// Iterates item records in first-insertion order.
    pub fn items(&self) -> impl Iterator<Item = &CartItem> + '_ {
        self.all_items
            .iter()
            .filter_map(|id| self.items_by_id.get(id))
    }

    /// Returns owned copies of the item records in first-insertion order.
    pub fn to_items(&self) -> Vec<CartItem> {
        self.items().cloned().collect()
    }

    /// Sum of `price × quantity` over all items.
    pub fn total(&self) -> Money {
        self.items().map(CartItem::line_total).sum()
    }

    /// Identifiers in first-insertion order.
    pub fn item_ids(&self) -> &[String] {
        &self.all_items
    }

    /// Looks up one item record.
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items_by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items_by_id.contains_key(id)
    }

    /// Number of distinct items.
    pub fn item_count(&self) -> usize {
        self.all_items.len()
    }

    /// Sum of quantities over all items.
    pub fn total_quantity(&self) -> i64 {
        self.items()
            .fold(0i64, |acc, item| acc.saturating_add(item.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.all_items.is_empty()
    }

    /// Summary of the cart for display.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    fn upsert(&mut self, item: CartItem) {
        if !self.items_by_id.contains_key(&item.id) {
            self.all_items.push(item.id.clone());
        }
        self.items_by_id.insert(item.id.clone(), item);
    }

    fn without(&self, id: &str) -> CartState {
        if !self.items_by_id.contains_key(id) {
            return self.clone();
        }

        let mut next = self.clone();
        next.items_by_id.remove(id);
        next.all_items.retain(|item_id| item_id != id);
        next
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary for the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub total: Money,
}

impl From<&CartState> for CartTotals {
    fn from(cart: &CartState) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
