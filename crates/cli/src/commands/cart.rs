//! Cart inspection commands.
//!
//! The cart is kept in a JSON key-value file, one blob under the `cart` key,
//! so a cart copied out of a browser's `localStorage` can be inspected and
//! edited with the same rules the storefront applies.

use std::path::Path;

use streuobst_core::cart::{CartCommand, CartError, CartProjection, CartStore};
use tracing::{info, warn};

use super::{CommandError, load_catalog};
use crate::file_storage::FileStorage;

/// Print the cart the way the cart panel renders it.
///
/// # Errors
///
/// Returns an error if the catalog or the stored cart cannot be read.
pub async fn show(catalog_path: &Path, store_path: &Path) -> Result<(), CommandError> {
    let catalog = load_catalog(catalog_path).await?;
    let store = CartStore::new(FileStorage::new(store_path), &catalog);
    let cart = store.load().await?;
    print_projection(&CartProjection::from(&cart));
    Ok(())
}

/// Apply one operation to the stored cart and print the result.
///
/// # Errors
///
/// Returns an error for unknown products and storage failures. Decrements
/// of products that are not in the cart and adds past the quantity limit
/// are errors too; the stored cart is left unchanged.
pub async fn apply(
    catalog_path: &Path,
    store_path: &Path,
    command: &CartCommand,
) -> Result<(), CommandError> {
    let catalog = load_catalog(catalog_path).await?;
    let store = CartStore::new(FileStorage::new(store_path), &catalog);

    let update = match store.apply(command).await {
        Ok(update) => update,
        Err(e @ (CartError::InvalidOperation { .. } | CartError::QuantityLimit { .. })) => {
            warn!(error = %e, "Nothing changed");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    info!(op = %command, path = %store_path.display(), "Cart updated");
    for (id, quantity) in &update.touched {
        info!("  {id} -> {quantity}");
    }
    print_projection(&CartProjection::from(&update.cart));
    Ok(())
}

fn print_projection(cart: &CartProjection) {
    if cart.is_empty() {
        info!("{}", cart.empty_message());
    } else {
        for row in &cart.rows {
            let unit = row
                .unit_price
                .as_ref()
                .map(|price| format!(" ({price} / Stück)"))
                .unwrap_or_default();
            info!(
                "{:>3} x {:<32} {:>10}{unit}",
                row.quantity, row.name, row.line_total
            );
        }
    }
    info!("Summe: {} ({} Artikel)", cart.total, cart.badge().count());
}
