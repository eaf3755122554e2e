//! Cart persistence.
//!
//! The whole cart is stored as one JSON blob under [`CART_KEY`], in the same
//! shape a browser would keep it in `localStorage`. Backends only move the
//! blob; encoding and invariant checks live in [`Cart::to_json`] and
//! [`Cart::from_json`].

use std::future::Future;
use std::sync::Mutex;

use super::Cart;

/// Key the serialized cart is stored under.
pub const CART_KEY: &str = "cart";

/// Errors raised by cart storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The blob could not be encoded or decoded.
    #[error("cart serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The blob decoded but breaks a cart invariant.
    #[error("stored cart is corrupt: {0}")]
    Corrupt(String),

    /// The backend failed to read or write.
    #[error("cart storage backend failed: {0}")]
    Backend(String),
}

/// Load/save access to the persisted cart.
///
/// `load` returns an empty cart when nothing has been stored yet. `save`
/// always overwrites the previous state in full.
pub trait CartStorage {
    /// Read the persisted cart.
    fn load(&self) -> impl Future<Output = Result<Cart, StorageError>> + Send;

    /// Replace the persisted cart.
    fn save(&self, cart: &Cart) -> impl Future<Output = Result<(), StorageError>> + Send;
}

impl<S: CartStorage> CartStorage for &S {
    fn load(&self) -> impl Future<Output = Result<Cart, StorageError>> + Send {
        (**self).load()
    }

    fn save(&self, cart: &Cart) -> impl Future<Output = Result<(), StorageError>> + Send {
        (**self).save(cart)
    }
}

/// In-memory storage that still round-trips through the JSON blob.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: Mutex<Option<String>>,
}

impl MemoryStorage {
    /// Empty storage (no key set).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a raw blob.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    /// The raw blob currently stored, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the lock is poisoned.
    pub fn raw(&self) -> Result<Option<String>, StorageError> {
        self.blob
            .lock()
            .map(|guard| guard.clone())
            .map_err(|e| StorageError::Backend(e.to_string()))
    }
}

impl CartStorage for MemoryStorage {
    async fn load(&self) -> Result<Cart, StorageError> {
        match self.raw()? {
            Some(blob) => Cart::from_json(&blob),
            None => Ok(Cart::new()),
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let blob = cart.to_json()?;
        let mut guard = self
            .blob
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        *guard = Some(blob);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::ProductSnapshot;
    use crate::types::{Price, ProductId};

    #[tokio::test]
    async fn test_load_without_key_is_empty() {
        let storage = MemoryStorage::new();
        assert!(storage.load().await.unwrap().is_empty());
        assert!(storage.raw().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_is_identical() {
        let storage = MemoryStorage::new();
        let mut cart = Cart::new();
        cart.add(ProductSnapshot {
            id: ProductId::parse("apfelsaft").unwrap(),
            name: "Apfelsaft".to_owned(),
            price: Price::from_cents(300),
            weight: "1 Liter".to_owned(),
            image: "/a.webp".to_owned(),
        })
        .unwrap();

        storage.save(&cart).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), cart);
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_an_error() {
        let storage = MemoryStorage::with_blob("{not json");
        assert!(matches!(
            storage.load().await,
            Err(StorageError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_negative_price_blob_is_rejected() {
        let storage = MemoryStorage::with_blob(
            r#"[{"id":"a","name":"A","price":"-5.00","weight":"","imgSrc":"","quantity":1}]"#,
        );
        assert!(storage.load().await.is_err());
    }

    #[tokio::test]
    async fn test_empty_array_blob() {
        let storage = MemoryStorage::with_blob("[]");
        assert!(storage.load().await.unwrap().is_empty());
    }
}
