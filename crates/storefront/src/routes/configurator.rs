//! Configurator page and tab route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use streuobst_core::cart::{Badge, CartProjection, CartStore};
use streuobst_core::ui::{MenuToggle, Overlay};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::services::SessionCartStorage;
use crate::state::AppState;
use crate::views::{CSS_HASH, HTMX_SRC, NavView, TabView, tab_views};

/// Query parameters for the configurator page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Tab to show first (defaults to the first catalog tab).
    pub tab: Option<String>,
}

/// Full configurator page.
#[derive(Template, WebTemplate)]
#[template(path = "configurator/index.html")]
pub struct ConfiguratorPageTemplate {
    pub css_hash: &'static str,
    pub htmx_src: &'static str,
    pub nav: NavView,
    pub badge: Badge,
    pub tabs: Vec<TabView>,
    pub cart: CartProjection,
    pub cart_panel: Overlay,
    pub error_overlay: Overlay,
}

/// Configurator section fragment (HTMX tab switch).
#[derive(Template, WebTemplate)]
#[template(path = "partials/configurator.html")]
pub struct ConfiguratorSectionTemplate {
    pub tabs: Vec<TabView>,
}

/// Render the configurator page.
///
/// Card quantities, the cart panel and the badge are all rendered from the
/// stored cart, so a reload shows exactly what was last saved.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Result<ConfiguratorPageTemplate> {
    let store = CartStore::new(SessionCartStorage::new(session), state.catalog());
    let cart = store.load().await?;
    let tabs = tab_views(state.catalog(), query.tab.as_deref(), &cart)?;
    let projection = CartProjection::from(&cart);

    Ok(ConfiguratorPageTemplate {
        css_hash: CSS_HASH,
        htmx_src: HTMX_SRC,
        nav: NavView::new(MenuToggle::default(), state.sticky_header(), 0),
        badge: projection.badge(),
        tabs,
        cart: projection,
        cart_panel: Overlay::default(),
        error_overlay: Overlay::default(),
    })
}

/// Switch the active configurator tab (HTMX).
#[instrument(skip(state, session))]
pub async fn section(
    State(state): State<AppState>,
    session: Session,
    Path(tab): Path<String>,
) -> Result<ConfiguratorSectionTemplate> {
    let store = CartStore::new(SessionCartStorage::new(session), state.catalog());
    let cart = store.load().await?;
    let tabs = tab_views(state.catalog(), Some(&tab), &cart)?;
    Ok(ConfiguratorSectionTemplate { tabs })
}
