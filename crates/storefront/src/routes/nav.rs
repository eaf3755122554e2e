//! Navigation bar route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use streuobst_core::cart::{Badge, CartStore};
use streuobst_core::ui::MenuToggle;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::services::SessionCartStorage;
use crate::state::AppState;
use crate::views::NavView;

/// Navbar query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct NavQuery {
    /// Whether the mobile menu is open.
    #[serde(default)]
    pub open: bool,
    /// Current vertical scroll offset in pixels.
    #[serde(default)]
    pub y: u32,
}

/// Navbar fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/navbar.html")]
pub struct NavbarTemplate {
    pub nav: NavView,
    pub badge: Badge,
}

/// Render the navbar for a menu state and scroll offset (HTMX).
///
/// Requested by the menu toggle and by the scroll listener whenever the
/// offset crosses the sticky threshold.
#[instrument(skip(state, session))]
pub async fn navbar(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NavQuery>,
) -> Result<NavbarTemplate> {
    let store = CartStore::new(SessionCartStorage::new(session), state.catalog());
    let cart = store.load().await?;
    Ok(NavbarTemplate {
        nav: NavView::new(MenuToggle::new(query.open), state.sticky_header(), query.y),
        badge: Badge::from(&cart),
    })
}
