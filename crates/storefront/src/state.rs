//! Application state shared across handlers.

use std::path::Path;
use std::sync::Arc;

use streuobst_core::catalog::{Catalog, CatalogError};
use streuobst_core::ui::StickyHeader;

use crate::config::StorefrontConfig;

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to read catalog {path}: {source}")]
    ReadCatalog {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid catalog {path}: {source}")]
    InvalidCatalog {
        path: String,
        source: CatalogError,
    },
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog is validated once
/// at start-up and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
}

impl AppState {
    /// Create a new application state from an already validated catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Load and validate the catalog named in `config`, then build the state.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or fails
    /// validation (malformed price, duplicate id, ...).
    pub fn load(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = load_catalog(&config.catalog_path)?;
        tracing::info!(
            path = %config.catalog_path.display(),
            tabs = catalog.tabs().len(),
            products = catalog.len(),
            "Catalog loaded"
        );
        Ok(Self::new(config, catalog))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Sticky-header rule from configuration.
    #[must_use]
    pub fn sticky_header(&self) -> StickyHeader {
        StickyHeader::new(self.inner.config.sticky_threshold)
    }
}

fn load_catalog(path: &Path) -> Result<Catalog, StateError> {
    let display = path.display().to_string();
    let yaml = std::fs::read_to_string(path).map_err(|source| StateError::ReadCatalog {
        path: display.clone(),
        source,
    })?;
    Catalog::from_yaml(&yaml).map_err(|source| StateError::InvalidCatalog {
        path: display,
        source,
    })
}
