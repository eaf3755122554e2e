//! Catalog validation command.
//!
//! # Usage
//!
//! ```bash
//! streuobst catalog check crates/storefront/content/catalog.yaml
//! ```

use std::path::Path;

use streuobst_core::format_price;
use tracing::info;

use super::{CommandError, load_catalog};

/// Validate a catalog and list every product with its id and price.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read or is invalid (malformed
/// price, duplicate product id, ...).
pub async fn check(path: &Path) -> Result<(), CommandError> {
    let catalog = load_catalog(path).await?;

    info!(
        path = %path.display(),
        tabs = catalog.tabs().len(),
        products = catalog.len(),
        "Catalog is valid"
    );

    for tab in catalog.tabs() {
        info!("[{}] {}", tab.key, tab.label);
        for product in &tab.products {
            info!(
                "  {:<32} {:>10}  {}",
                product.id.as_str(),
                format_price(product.price),
                product.name
            );
        }
    }

    Ok(())
}
