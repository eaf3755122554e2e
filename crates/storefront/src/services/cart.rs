//! Session-backed cart storage.
//!
//! Each visitor's cart is kept in their session as the same JSON blob a
//! browser would keep in `localStorage`, under [`CART_KEY`]. The session is
//! the per-visitor key-value store; nothing else is persisted server side.

use streuobst_core::cart::{CART_KEY, Cart, CartStorage, StorageError};
use tower_sessions::Session;

/// [`CartStorage`] over a tower-sessions [`Session`].
#[derive(Debug, Clone)]
pub struct SessionCartStorage {
    session: Session,
}

impl SessionCartStorage {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CartStorage for SessionCartStorage {
    async fn load(&self) -> Result<Cart, StorageError> {
        let blob = self
            .session
            .get::<String>(CART_KEY)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        match blob {
            Some(blob) => Cart::from_json(&blob),
            None => Ok(Cart::new()),
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let blob = cart.to_json()?;
        self.session
            .insert(CART_KEY, blob)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use streuobst_core::cart::ProductSnapshot;
    use streuobst_core::{Price, ProductId};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_empty_session_loads_empty_cart() {
        let storage = SessionCartStorage::new(session());
        assert!(storage.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let storage = SessionCartStorage::new(session());
        let mut cart = Cart::new();
        cart.add(ProductSnapshot {
            id: ProductId::parse("apfelsaft").unwrap(),
            name: "Apfelsaft".to_string(),
            price: Price::from_cents(300),
            weight: "1 Liter".to_string(),
            image: "/a.webp".to_string(),
        })
        .unwrap();

        storage.save(&cart).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), cart);
    }
}
