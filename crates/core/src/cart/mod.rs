//! Shopping cart line items and store operations.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s with at most one item per
//! [`ProductId`] and a quantity between one and [`MAX_QUANTITY`] for every
//! item. Operations that would drop a quantity to zero remove the item
//! instead.
//!
//! Persistence lives behind [`CartStorage`]; [`CartStore`] ties a storage
//! backend and the catalog together and rewrites the whole cart after every
//! mutation.

pub mod command;
pub mod projection;
pub mod storage;
pub mod store;

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Price, ProductId};

pub use command::{CartCommand, CommandError};
pub use projection::{Badge, CartProjection, CartRow, EMPTY_CART_MESSAGE};
pub use storage::{CART_KEY, CartStorage, MemoryStorage, StorageError};
pub use store::{CartStore, CartUpdate};

/// Largest quantity a single line item may reach.
pub const MAX_QUANTITY: u32 = 999;

/// Errors raised by cart operations.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// Decrement of a product that is not in the cart.
    #[error("'{id}' is not in the cart")]
    InvalidOperation {
        /// Product the operation targeted.
        id: ProductId,
    },

    /// Add of a product whose line item is already at [`MAX_QUANTITY`].
    #[error("'{id}' is already at the maximum quantity of {MAX_QUANTITY}")]
    QuantityLimit {
        /// Product the operation targeted.
        id: ProductId,
    },

    /// Add of a product that is neither in the cart nor in the catalog.
    #[error("unknown product '{id}'")]
    UnknownProduct {
        /// Product the operation targeted.
        id: ProductId,
    },

    /// Loading or saving the cart failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Product fields captured when a product first enters the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub weight: String,
    pub image: String,
}

/// One cart entry.
///
/// `name`, `price`, `weight` and `image` are frozen at first insertion; a
/// later catalog change does not touch existing line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub weight: String,
    #[serde(rename = "imgSrc")]
    pub image: String,
    pub quantity: u32,
}

impl LineItem {
    fn from_snapshot(snapshot: ProductSnapshot) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name,
            price: snapshot.price,
            weight: snapshot.weight,
            image: snapshot.image,
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Ordered collection of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line item for `id`, if present.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    fn find_mut(&mut self, id: &ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Quantity of `id` in the cart, 0 when absent.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.find(id).map_or(0, |item| item.quantity)
    }

    /// Add one unit of a product.
    ///
    /// Increments an existing line item (ignoring the snapshot) or appends a
    /// new one with quantity 1. Returns the resulting quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityLimit`] if the existing line item is
    /// already at [`MAX_QUANTITY`]; the cart is left unchanged.
    pub fn add(&mut self, snapshot: ProductSnapshot) -> Result<u32, CartError> {
        if self.find(&snapshot.id).is_some() {
            return self.increment(&snapshot.id);
        }
        self.items.push(LineItem::from_snapshot(snapshot));
        Ok(1)
    }

    /// Add one unit of a product that is already in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidOperation`] if `id` is not in the cart and
    /// [`CartError::QuantityLimit`] if it is already at [`MAX_QUANTITY`].
    pub fn increment(&mut self, id: &ProductId) -> Result<u32, CartError> {
        let item = self
            .find_mut(id)
            .ok_or_else(|| CartError::InvalidOperation { id: id.clone() })?;
        if item.quantity >= MAX_QUANTITY {
            return Err(CartError::QuantityLimit { id: id.clone() });
        }
        item.quantity += 1;
        Ok(item.quantity)
    }

    /// Remove one unit of a product, dropping the line item at zero.
    ///
    /// Returns the remaining quantity (0 when the item was removed).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidOperation`] if `id` is not in the cart;
    /// the cart is left unchanged.
    pub fn decrement(&mut self, id: &ProductId) -> Result<u32, CartError> {
        let pos = self
            .items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| CartError::InvalidOperation { id: id.clone() })?;

        let remaining = match self.items.get_mut(pos) {
            Some(item) => {
                item.quantity = item.quantity.saturating_sub(1);
                item.quantity
            }
            None => 0,
        };
        if remaining == 0 {
            self.items.remove(pos);
        }
        Ok(remaining)
    }

    /// Remove a line item regardless of quantity.
    ///
    /// Returns whether an item was removed; absent ids are a no-op.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    /// Remove every line item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all quantities, saturating at `u32::MAX`.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |total, item| total.saturating_add(item.quantity))
    }

    /// Sum of `price × quantity` over all line items.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Serialize the cart into its persisted JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a cart from its persisted JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialization`] if the blob is not a valid
    /// list of line items (including out-of-range prices) and
    /// [`StorageError::Corrupt`] if it breaks a cart invariant.
    pub fn from_json(blob: &str) -> Result<Self, StorageError> {
        let items: Vec<LineItem> = serde_json::from_str(blob)?;
        Self::try_from(items)
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = StorageError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        let mut seen = std::collections::HashSet::new();
        for item in &items {
            if item.quantity == 0 || item.quantity > MAX_QUANTITY {
                return Err(StorageError::Corrupt(format!(
                    "line item '{}' has quantity {} outside 1..={MAX_QUANTITY}",
                    item.id, item.quantity
                )));
            }
            if !seen.insert(&item.id) {
                return Err(StorageError::Corrupt(format!(
                    "line item '{}' appears more than once",
                    item.id
                )));
            }
        }
        Ok(Self { items })
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<LineItem>::deserialize(deserializer)?;
        Self::try_from(items).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::types::parse_price;

    fn snapshot(name: &str, price: &str) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::from_name(name).unwrap(),
            name: name.to_owned(),
            price: parse_price(price).unwrap(),
            weight: "1 Liter".to_owned(),
            image: format!("/static/images/{}.webp", ProductId::from_name(name).unwrap()),
        }
    }

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    #[test]
    fn test_add_appends_then_increments() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(snapshot("Apfelsaft", "3,00 €")).unwrap(), 1);
        assert_eq!(cart.add(snapshot("Apfelsaft", "3,00 €")).unwrap(), 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(&id("apfelsaft")), 2);
    }

    #[test]
    fn test_add_keeps_first_snapshot() {
        let mut cart = Cart::new();
        cart.add(snapshot("Apfelsaft", "3,00 €")).unwrap();
        cart.add(snapshot("Apfelsaft", "9,99 €")).unwrap();
        let item = cart.find(&id("apfelsaft")).unwrap();
        assert_eq!(item.price, Price::from_cents(300));
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_decrement_quantity_one_removes_item() {
        let mut cart = Cart::new();
        cart.add(snapshot("Apfelsaft", "3,00 €")).unwrap();
        assert_eq!(cart.decrement(&id("apfelsaft")).unwrap(), 0);
        assert!(cart.is_empty());
        assert!(cart.find(&id("apfelsaft")).is_none());
    }

    #[test]
    fn test_decrement_absent_is_invalid_and_unchanged() {
        let mut cart = Cart::new();
        cart.add(snapshot("Apfelsaft", "3,00 €")).unwrap();
        let before = cart.clone();

        let err = cart.decrement(&id("birnensaft")).unwrap_err();
        assert!(matches!(err, CartError::InvalidOperation { .. }));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_increment_requires_existing_item() {
        let mut cart = Cart::new();
        assert!(cart.increment(&id("apfelsaft")).is_err());
        cart.add(snapshot("Apfelsaft", "3,00 €")).unwrap();
        assert_eq!(cart.increment(&id("apfelsaft")).unwrap(), 2);
    }

    #[test]
    fn test_remove_is_unconditional_and_idempotent() {
        let mut cart = Cart::new();
        cart.add(snapshot("Apfelsaft", "3,00 €")).unwrap();
        cart.add(snapshot("Apfelsaft", "3,00 €")).unwrap();
        assert!(cart.remove(&id("apfelsaft")));
        assert!(!cart.remove(&id("apfelsaft")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_scenario() {
        let mut cart = Cart::new();
        cart.add(snapshot("Apfelsaft", "3,00€")).unwrap();
        cart.add(snapshot("Apfelsaft", "3,00€")).unwrap();
        cart.add(snapshot("Birnensaft", "1,50€")).unwrap();

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Price::from_cents(750));
        assert_eq!(cart.total_price().to_string(), "€7,50");

        cart.remove(&id("birnensaft"));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(&id("apfelsaft")), 2);
    }

    #[test]
    fn test_json_round_trip_preserves_order_and_fields() {
        let mut cart = Cart::new();
        cart.add(snapshot("Birnensaft", "1,50 €")).unwrap();
        cart.add(snapshot("Apfelsaft", "3,00 €")).unwrap();
        cart.add(snapshot("Birnensaft", "1,50 €")).unwrap();

        let restored = Cart::from_json(&cart.to_json().unwrap()).unwrap();
        assert_eq!(restored, cart);
        assert_eq!(restored.items()[0].id, id("birnensaft"));
    }

    #[test]
    fn test_json_uses_img_src_key() {
        let mut cart = Cart::new();
        cart.add(snapshot("Apfelsaft", "3,00 €")).unwrap();
        let json = cart.to_json().unwrap();
        assert!(json.contains("\"imgSrc\""));
        assert!(json.contains("\"price\":\"3.00\""));
    }

    fn blob(price: &str, quantities: &[u32]) -> String {
        let items: Vec<String> = quantities
            .iter()
            .enumerate()
            .map(|(i, quantity)| {
                format!(
                    r#"{{"id":"p{i}","name":"P","price":"{price}","weight":"","imgSrc":"","quantity":{quantity}}}"#
                )
            })
            .collect();
        format!("[{}]", items.join(","))
    }

    #[test]
    fn test_from_json_rejects_broken_invariants() {
        assert!(matches!(
            Cart::from_json(&blob("1.00", &[0])),
            Err(StorageError::Corrupt(_))
        ));

        let dup = r#"[
            {"id":"a","name":"A","price":"1.00","weight":"","imgSrc":"","quantity":1},
            {"id":"a","name":"A","price":"1.00","weight":"","imgSrc":"","quantity":2}
        ]"#;
        assert!(matches!(Cart::from_json(dup), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_from_json_rejects_quantity_above_limit() {
        assert!(Cart::from_json(&blob("1.00", &[MAX_QUANTITY])).is_ok());
        assert!(matches!(
            Cart::from_json(&blob("1.00", &[MAX_QUANTITY + 1])),
            Err(StorageError::Corrupt(_))
        ));
        assert!(matches!(
            Cart::from_json(&blob("1.00", &[4_000_000_000, 4_000_000_000])),
            Err(StorageError::Corrupt(_))
        ));
        assert!(matches!(
            Cart::from_json(&blob("1.00", &[u32::MAX])),
            Err(StorageError::Corrupt(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_out_of_range_price() {
        assert!(matches!(
            Cart::from_json(&blob("-5.00", &[1])),
            Err(StorageError::Serialization(_))
        ));
        assert!(matches!(
            Cart::from_json(&blob("79228162514264337593543950335", &[2])),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn test_totals_at_the_limits() {
        let cart = Cart::from_json(&blob("100000000", &[MAX_QUANTITY, MAX_QUANTITY])).unwrap();
        assert_eq!(cart.total_items(), 2 * MAX_QUANTITY);
        assert_eq!(
            cart.total_price().amount(),
            rust_decimal::Decimal::from(199_800_000_000_u64)
        );
    }

    #[test]
    fn test_increment_stops_at_quantity_limit() {
        let mut cart = Cart::from_json(&blob("1.00", &[MAX_QUANTITY])).unwrap();
        let before = cart.clone();

        let err = cart.increment(&id("p0")).unwrap_err();
        assert!(matches!(err, CartError::QuantityLimit { .. }));
        let item = ProductSnapshot {
            id: id("p0"),
            name: "P".to_owned(),
            price: Price::from_cents(100),
            weight: String::new(),
            image: String::new(),
        };
        assert!(matches!(cart.add(item), Err(CartError::QuantityLimit { .. })));
        assert_eq!(cart, before);
        assert_eq!(cart.decrement(&id("p0")).unwrap(), MAX_QUANTITY - 1);
    }

    #[test]
    fn test_random_operation_sequences_keep_invariants() {
        let products = [
            snapshot("Apfelsaft", "3,00 €"),
            snapshot("Birnensaft", "1,50 €"),
            snapshot("Quittensaft", "4,20 €"),
            snapshot("Probierpaket", "12,90 €"),
        ];
        let mut rng = StdRng::seed_from_u64(0x5EED);

        for _ in 0..200 {
            let mut cart = Cart::new();
            for _ in 0..50 {
                let product = &products[rng.random_range(0..products.len())];
                match rng.random_range(0..3) {
                    0 => {
                        if let Err(e) = cart.add(product.clone()) {
                            assert!(matches!(e, CartError::QuantityLimit { .. }));
                        }
                    }
                    1 => {
                        let before = cart.clone();
                        if cart.decrement(&product.id).is_err() {
                            assert_eq!(cart, before);
                        }
                    }
                    _ => {
                        cart.remove(&product.id);
                    }
                }

                let mut ids = std::collections::HashSet::new();
                for item in cart.items() {
                    assert!(item.quantity >= 1);
                    assert!(ids.insert(item.id.clone()));
                }
                let quantities: u32 = cart.items().iter().map(|i| i.quantity).sum();
                assert_eq!(cart.total_items(), quantities);
                let expected: Price = cart
                    .items()
                    .iter()
                    .map(|i| i.price.times(i.quantity))
                    .sum();
                assert_eq!(cart.total_price(), expected);
            }
        }
    }
}
