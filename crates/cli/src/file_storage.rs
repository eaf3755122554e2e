//! Cart storage in a local JSON key-value file.
//!
//! The file holds a JSON object mapping keys to string blobs, mirroring a
//! browser's `localStorage`. Only the [`CART_KEY`] entry is read or written;
//! other keys are preserved.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use streuobst_core::cart::{CART_KEY, Cart, CartStorage, StorageError};

/// [`CartStorage`] over a JSON key-value file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read all entries; a missing file is an empty store.
    async fn read_entries(&self) -> Result<Map<String, Value>, StorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(backend_error(&self.path, &e)),
        };

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(entries) => Ok(entries),
            other => Err(StorageError::Corrupt(format!(
                "{} is not a key-value object (found {})",
                self.path.display(),
                json_kind(&other)
            ))),
        }
    }
}

impl CartStorage for FileStorage {
    async fn load(&self) -> Result<Cart, StorageError> {
        let entries = self.read_entries().await?;
        match entries.get(CART_KEY) {
            None | Some(Value::Null) => Ok(Cart::new()),
            Some(Value::String(blob)) => Cart::from_json(blob),
            Some(other) => Err(StorageError::Corrupt(format!(
                "'{CART_KEY}' holds {} instead of a string",
                json_kind(other)
            ))),
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let mut entries = self.read_entries().await?;
        entries.insert(CART_KEY.to_string(), Value::String(cart.to_json()?));

        let content = serde_json::to_string_pretty(&Value::Object(entries))?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| backend_error(&self.path, &e))?;

        tracing::debug!(path = %self.path.display(), items = cart.len(), "Cart written");
        Ok(())
    }
}

fn backend_error(path: &Path, err: &std::io::Error) -> StorageError {
    StorageError::Backend(format!("{}: {err}", path.display()))
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
