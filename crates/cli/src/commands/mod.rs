//! CLI subcommands.

pub mod cart;
pub mod catalog;

use std::path::Path;

use streuobst_core::cart::CartError;
use streuobst_core::catalog::{Catalog, CatalogError};
use thiserror::Error;

/// Default catalog location, relative to the workspace root.
pub const DEFAULT_CATALOG: &str = "crates/storefront/content/catalog.yaml";

/// Default cart store location.
pub const DEFAULT_STORE: &str = ".streuobst-cart.json";

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The catalog file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// The catalog failed validation.
    #[error("Invalid catalog {path}: {source}")]
    Catalog {
        path: String,
        source: CatalogError,
    },

    /// A cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Read and validate a catalog file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation.
pub async fn load_catalog(path: &Path) -> Result<Catalog, CommandError> {
    let display = path.display().to_string();
    let yaml = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Read {
            path: display.clone(),
            source,
        })?;
    Catalog::from_yaml(&yaml).map_err(|source| CommandError::Catalog {
        path: display,
        source,
    })
}
