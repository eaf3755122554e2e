//! Template view models.
//!
//! Everything a template shows is computed here from core state (cart,
//! catalog, UI toggles); templates only lay it out.

use streuobst_core::cart::Cart;
use streuobst_core::catalog::Catalog;
use streuobst_core::ui::{MenuToggle, StickyHeader, TabSet};
use streuobst_core::{ProductId, format_price};

use crate::error::AppError;

/// Content hash of `static/css/main.css`, computed by the build script.
pub const CSS_HASH: &str = env!("CSS_HASH");

/// HTMX script URL.
pub const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4/dist/htmx.min.js";

/// Navigation bar state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavView {
    pub menu_open: bool,
    pub sticky: bool,
    pub wave_visible: bool,
    pub threshold: u32,
    pub scroll_y: u32,
}

impl NavView {
    #[must_use]
    pub const fn new(menu: MenuToggle, header: StickyHeader, scroll_y: u32) -> Self {
        let state = header.at(scroll_y);
        Self {
            menu_open: menu.is_open(),
            sticky: state.sticky,
            wave_visible: state.wave_visible,
            threshold: header.threshold(),
            scroll_y,
        }
    }

    /// URL that re-renders the navbar with the menu toggled.
    #[must_use]
    pub fn toggle_href(&self) -> String {
        let mut menu = MenuToggle::new(self.menu_open);
        format!("/nav?open={}&y={}", menu.toggle(), self.scroll_y)
    }
}

/// One product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub weight: String,
    pub image: String,
    /// Quantity currently in the cart.
    pub quantity: u32,
}

/// One configurator tab with its panel of cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub key: String,
    pub label: String,
    pub active: bool,
    pub cards: Vec<CardView>,
}

/// Build the configurator tabs with `active` selected (first tab when
/// `None`) and card quantities taken from `cart`.
///
/// # Errors
///
/// Returns [`AppError::Ui`] when `active` names no tab.
pub fn tab_views(
    catalog: &Catalog,
    active: Option<&str>,
    cart: &Cart,
) -> Result<Vec<TabView>, AppError> {
    let mut tabs = TabSet::new(catalog.tab_keys())
        .ok_or_else(|| AppError::Internal("catalog has no tabs".to_string()))?;
    if let Some(key) = active {
        tabs.activate(key)?;
    }

    Ok(catalog
        .tabs()
        .iter()
        .map(|tab| TabView {
            key: tab.key.clone(),
            label: tab.label.clone(),
            active: tabs.is_active(&tab.key),
            cards: tab
                .products
                .iter()
                .map(|product| CardView {
                    id: product.id.clone(),
                    name: product.name.clone(),
                    price: format_price(product.price),
                    weight: product.weight.clone(),
                    image: product.image.clone(),
                    quantity: cart.quantity_of(&product.id),
                })
                .collect(),
        })
        .collect())
}

/// New visible quantity for a product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardQuantity {
    pub id: ProductId,
    pub quantity: u32,
}

/// Card quantities to push to the page, limited to products that have a card.
#[must_use]
pub fn card_quantities(catalog: &Catalog, touched: &[(ProductId, u32)]) -> Vec<CardQuantity> {
    touched
        .iter()
        .filter(|(id, _)| catalog.find(id).is_some())
        .map(|(id, quantity)| CardQuantity {
            id: id.clone(),
            quantity: *quantity,
        })
        .collect()
}
