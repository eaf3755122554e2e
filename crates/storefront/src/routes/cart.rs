//! Cart route handlers.
//!
//! Every cart button on the page is a submit button named `op` whose value is
//! `action:product_id`. The configurator panel and the cart panel are each one
//! form posting to `/cart/action`, so a single handler serves every button,
//! including buttons rendered after the page loaded. The response carries
//! only out-of-band swaps for the regions that changed.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use streuobst_core::ProductId;
use streuobst_core::cart::{Badge, Cart, CartCommand, CartError, CartProjection, CartStore};
use streuobst_core::catalog::Catalog;
use streuobst_core::ui::Overlay;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_cart_breadcrumb};
use crate::routes::overlay::OverlayQuery;
use crate::services::SessionCartStorage;
use crate::state::AppState;
use crate::views::{CardQuantity, card_quantities};

/// Cart action form data.
#[derive(Debug, Deserialize)]
pub struct CartActionForm {
    /// `action:product_id`, e.g. `add:bio-apfelsaft-1l`.
    pub op: String,
}

/// Cart panel fragment (HTMX open/close).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_modal.html")]
pub struct CartPanelTemplate {
    pub cart: CartProjection,
    pub cart_panel: Overlay,
}

/// Cart count badge fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub badge: Badge,
}

/// Out-of-band update after a cart action.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_update.html")]
pub struct CartUpdateTemplate {
    pub cart: CartProjection,
    pub badge: Badge,
    pub quantities: Vec<CardQuantity>,
    pub error_overlay: Overlay,
}

impl CartUpdateTemplate {
    fn new(catalog: &Catalog, cart: &Cart, touched: &[(ProductId, u32)]) -> Self {
        let projection = CartProjection::from(cart);
        Self {
            badge: projection.badge(),
            cart: projection,
            quantities: card_quantities(catalog, touched),
            error_overlay: Overlay::default(),
        }
    }

    fn with_error(mut self) -> Self {
        self.error_overlay.open();
        self
    }
}

/// Apply a cart action (HTMX).
///
/// Decrementing a product that is not in the cart, or adding past the
/// quantity limit, leaves the stored cart untouched and opens the error
/// overlay instead.
#[instrument(skip(state, session))]
pub async fn action(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartActionForm>,
) -> Result<Response> {
    let command: CartCommand = form.op.parse()?;
    add_cart_breadcrumb(command.action(), command.product_id().map(ProductId::as_str));

    let store = CartStore::new(SessionCartStorage::new(session), state.catalog());

    match store.apply(&command).await {
        Ok(update) => {
            Ok(CartUpdateTemplate::new(state.catalog(), &update.cart, &update.touched)
                .into_response())
        }
        Err(CartError::InvalidOperation { id } | CartError::QuantityLimit { id }) => {
            tracing::info!(product_id = %id, command = %command, "Cart action rejected");
            let cart = store.load().await?;
            let touched = [(id.clone(), cart.quantity_of(&id))];
            Ok(CartUpdateTemplate::new(state.catalog(), &cart, &touched)
                .with_error()
                .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Open or close the cart panel (HTMX).
#[instrument(skip(state, session))]
pub async fn panel(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<OverlayQuery>,
) -> Result<CartPanelTemplate> {
    let store = CartStore::new(SessionCartStorage::new(session), state.catalog());
    let cart = store.load().await?;
    Ok(CartPanelTemplate {
        cart: CartProjection::from(&cart),
        cart_panel: query.overlay(),
    })
}

/// Get cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<CartCountTemplate> {
    let store = CartStore::new(SessionCartStorage::new(session), state.catalog());
    let cart = store.load().await?;
    Ok(CartCountTemplate {
        badge: Badge::from(&cart),
    })
}
