//! # Domain Types
//!
//! Product input records and the item records stored in a cart.
//!
//! ## Record Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────────────────────┐          ┌──────────────────────────┐     │
//! │  │        Product           │   add    │        CartItem          │     │
//! │  │  ──────────────────────  │ ───────► │  ──────────────────────  │     │
//! │  │  _id                     │          │  _id                     │     │
//! │  │  price, name, image, ... │          │  price, name, image, ... │     │
//! │  │  (free-form attributes)  │          │  quantity (≥ 1)          │     │
//! │  └──────────────────────────┘          └──────────────────────────┘     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Attributes are kept as a JSON map so the cart never has to know what a
//! product looks like beyond its identifier and price. On the wire both
//! records are flat objects, e.g. `{"_id": "tee", "price": 10, "quantity": 2}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::money::Money;
use crate::validation::{coerce_number, deserialize_item_id};
use crate::{ID_FIELD, PRICE_FIELD, QUANTITY_FIELD};

// =============================================================================
// Product
// =============================================================================

/// A product record handed to the cart by the view layer.
///
/// A missing, null or non-scalar `_id` deserializes to an empty identifier,
/// which every cart transition rejects. Numeric identifiers are stringified.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Product {
    /// Item identifier.
    #[serde(rename = "_id", default, deserialize_with = "deserialize_item_id")]
    pub id: String,

    /// Every other field of the record.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Product {
    /// Creates a product with no attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Product {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    /// Sets the `price` attribute (major currency units).
    pub fn with_price(self, price: impl Into<Value>) -> Self {
        self.with_attribute(PRICE_FIELD, price)
    }

    /// Sets an arbitrary attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// An item record held in the cart: product attributes plus a quantity.
///
/// ## Invariants
/// - `quantity >= 1` while the item is in a cart
/// - `attributes` never holds `_id` or `quantity` keys
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    /// Item identifier.
    #[serde(rename = "_id")]
    pub id: String,

    /// Quantity in cart.
    pub quantity: i64,

    /// Product attributes as of the last add (last write wins).
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl CartItem {
    /// Creates an item record from a product and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            id: product.id.clone(),
            quantity,
            attributes: strip_reserved(product.attributes.clone()),
        }
    }

    /// Creates a bare record for an identifier with no known attributes.
    ///
    /// Used when a quantity update arrives for an item that was never added.
    pub fn bare(id: impl Into<String>, quantity: i64) -> Self {
        CartItem {
            id: id.into(),
            quantity,
            attributes: Map::new(),
        }
    }

    /// Returns a single attribute, if present.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns the coerced unit price in major units.
    pub fn price(&self) -> f64 {
        self.attributes.get(PRICE_FIELD).map_or(0.0, coerce_number)
    }

    /// Calculates the line total (unit price × quantity).
    ///
    /// The product is taken on the unrounded price and rounded to the cent
    /// once per line, so sub-cent prices add up: 100 × 0.005 is $0.50.
    pub fn line_total(&self) -> Money {
        Money::from_major_units(self.price() * self.quantity as f64)
    }
}

fn strip_reserved(mut attributes: Map<String, Value>) -> Map<String, Value> {
    attributes.remove(ID_FIELD);
    attributes.remove(QUANTITY_FIELD);
    attributes
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_from_json() {
        let product: Product =
            serde_json::from_value(json!({"_id": "tee", "price": 10, "name": "Tee"})).unwrap();

        assert_eq!(product.id, "tee");
        assert_eq!(product.attributes.get("name"), Some(&json!("Tee")));
        assert_eq!(product.attributes.get("price"), Some(&json!(10)));
        assert!(!product.attributes.contains_key(ID_FIELD));
    }

    #[test]
    fn test_product_loose_id() {
        let parse = |raw: Value| serde_json::from_value::<Product>(raw).unwrap().id;

        assert_eq!(parse(json!({"_id": null})), "");
        assert_eq!(parse(json!({"_id": ["a"]})), "");
        assert_eq!(parse(json!({"_id": 42})), "42");
    }

    #[test]
    fn test_product_without_id_has_empty_id() {
        let product: Product = serde_json::from_value(json!({"price": 3})).unwrap();
        assert!(product.id.is_empty());
    }

    #[test]
    fn test_cart_item_drops_incoming_quantity() {
        let product = Product::new("mug").with_price(5).with_attribute("quantity", 40);
        let item = CartItem::from_product(&product, 1);

        assert_eq!(item.quantity, 1);
        assert!(item.attribute("quantity").is_none());
        assert_eq!(item.attribute("price"), Some(&json!(5)));
    }

    #[test]
    fn test_cart_item_serializes_flat() {
        let item = CartItem::from_product(&Product::new("mug").with_price(5), 3);
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value, json!({"_id": "mug", "quantity": 3, "price": 5}));
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::from_product(&Product::new("pen").with_price("2.99"), 3);
        assert_eq!(item.line_total().cents(), 897);
    }

    #[test]
    fn test_line_total_rounds_once_per_line() {
        let item = CartItem::from_product(&Product::new("bolt").with_price(0.005), 100);
        assert_eq!(item.price(), 0.005);
        assert_eq!(item.line_total().cents(), 50);

        let item = CartItem::from_product(&Product::new("bolt").with_price("0.333"), 3);
        assert_eq!(item.line_total().cents(), 100);
    }

    #[test]
    fn test_line_total_saturates() {
        let item = CartItem::from_product(&Product::new("yacht").with_price(1e9), i64::MAX);
        assert_eq!(item.line_total().cents(), i64::MAX);
    }

    #[test]
    fn test_missing_or_bad_price_is_zero() {
        assert_eq!(CartItem::bare("x", 4).line_total(), Money::zero());

        let item = CartItem::from_product(&Product::new("x").with_price("n/a"), 4);
        assert_eq!(item.line_total(), Money::zero());
    }
}
