//! Display projection of a cart.
//!
//! Pure functions of the cart state: nothing here reads storage or the
//! catalog, so the rendered panel always reflects what was last persisted.

use super::{Cart, LineItem};
use crate::types::{Price, ProductId, format_price};

/// Message shown in place of rows when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Dein Warenkorb ist leer.";

/// One visible cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    pub id: ProductId,
    pub name: String,
    pub weight: String,
    pub image: String,
    pub quantity: u32,
    /// Formatted `price × quantity`.
    pub line_total: String,
    /// Formatted unit price, only when more than one unit is in the cart.
    pub unit_price: Option<String>,
}

impl From<&LineItem> for CartRow {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            weight: item.weight.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            line_total: format_price(item.line_total()),
            unit_price: (item.quantity > 1).then(|| format_price(item.price)),
        }
    }
}

/// Everything the cart panel displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartProjection {
    pub rows: Vec<CartRow>,
    /// Formatted grand total (`€0,00` when empty).
    pub total: String,
    pub item_count: u32,
}

impl CartProjection {
    /// Whether the empty-state message should be shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The empty-state message.
    #[must_use]
    pub const fn empty_message(&self) -> &'static str {
        EMPTY_CART_MESSAGE
    }

    /// Badge for this projection's item count.
    #[must_use]
    pub const fn badge(&self) -> Badge {
        Badge::new(self.item_count)
    }
}

impl From<&Cart> for CartProjection {
    fn from(cart: &Cart) -> Self {
        let rows: Vec<CartRow> = cart.items().iter().map(CartRow::from).collect();
        let total = if rows.is_empty() {
            format_price(Price::ZERO)
        } else {
            format_price(cart.total_price())
        };
        Self {
            rows,
            total,
            item_count: cart.total_items(),
        }
    }
}

/// Cart badge: the item count, hidden when the cart is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    count: u32,
}

impl Badge {
    /// Badge for `count` items.
    #[must_use]
    pub const fn new(count: u32) -> Self {
        Self { count }
    }

    /// Item count.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Whether the badge is hidden.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.count == 0
    }
}

impl From<&Cart> for Badge {
    fn from(cart: &Cart) -> Self {
        Self::new(cart.total_items())
    }
}
