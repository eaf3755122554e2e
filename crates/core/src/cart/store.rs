//! Cart store: load, mutate, persist.

use super::{Cart, CartCommand, CartError, CartStorage, MAX_QUANTITY};
use crate::catalog::Catalog;
use crate::types::ProductId;

/// Result of a successful cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartUpdate {
    /// The cart as persisted after the mutation.
    pub cart: Cart,
    /// Products whose visible quantity changed, with their new quantity.
    pub touched: Vec<(ProductId, u32)>,
}

/// Cart operations over an injected storage backend.
///
/// Every [`apply`](Self::apply) reads the persisted cart, mutates it and
/// writes it back in full before returning. A failed operation writes
/// nothing.
#[derive(Debug)]
pub struct CartStore<'a, S> {
    storage: S,
    catalog: &'a Catalog,
}

impl<'a, S: CartStorage> CartStore<'a, S> {
    /// Create a store over `storage`, resolving new products from `catalog`.
    pub const fn new(storage: S, catalog: &'a Catalog) -> Self {
        Self { storage, catalog }
    }

    /// Read the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the backend or blob is broken.
    pub async fn load(&self) -> Result<Cart, CartError> {
        Ok(self.storage.load().await?)
    }

    /// Apply one command and persist the result.
    ///
    /// `Add` increments an existing line item; otherwise the product is
    /// snapshotted from the catalog. `Decrement` of an absent product is an
    /// [`CartError::InvalidOperation`]; an `Add` past [`MAX_QUANTITY`] is a
    /// [`CartError::QuantityLimit`]. `Remove` of an absent product is a
    /// no-op that still rewrites the (unchanged) cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] for invalid operations, unknown products and
    /// storage failures.
    pub async fn apply(&self, command: &CartCommand) -> Result<CartUpdate, CartError> {
        let mut cart = self.storage.load().await?;

        let touched = match command {
            CartCommand::Add(id) => {
                let quantity = if cart.find(id).is_some() {
                    cart.increment(id)?
                } else {
                    let product = self
                        .catalog
                        .find(id)
                        .ok_or_else(|| CartError::UnknownProduct { id: id.clone() })?;
                    cart.add(product.snapshot())?
                };
                vec![(id.clone(), quantity)]
            }
            CartCommand::Decrement(id) => {
                let quantity = cart.decrement(id)?;
                vec![(id.clone(), quantity)]
            }
            CartCommand::Remove(id) => {
                cart.remove(id);
                vec![(id.clone(), 0)]
            }
            CartCommand::Clear => {
                let ids = cart.items().iter().map(|item| (item.id.clone(), 0)).collect();
                cart.clear();
                ids
            }
        };

        self.storage.save(&cart).await?;

        tracing::debug!(
            command = %command,
            items = cart.total_items(),
            "Cart updated"
        );

        Ok(CartUpdate { cart, touched })
    }
}
