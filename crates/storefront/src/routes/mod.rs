//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Configurator page (?tab=key selects a tab)
//! GET  /health                 - Health check
//!
//! # Configurator (HTMX fragments)
//! GET  /configurator/:tab      - Configurator section with :tab active
//! GET  /nav                    - Navbar (?open=bool&y=scroll offset)
//! GET  /overlay/error          - Error overlay (?action=open|close|backdrop)
//!
//! # Cart (HTMX fragments)
//! POST /cart/action            - Apply `op=action:id` (returns OOB swaps)
//! GET  /cart/panel             - Cart panel (?action=open|close|backdrop)
//! GET  /cart/count             - Cart count badge
//! ```

pub mod cart;
pub mod configurator;
pub mod nav;
pub mod overlay;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/action", post(cart::action))
        .route("/panel", get(cart::panel))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(configurator::index))
        .route("/configurator/{tab}", get(configurator::section))
        .route("/nav", get(nav::navbar))
        .route("/overlay/error", get(overlay::error))
        .nest("/cart", cart_routes())
}
