//! Page UI state.
//!
//! The configurator tabs, the navigation bar and the overlays are independent
//! toggles with no shared state and no connection to the cart. Each is a small
//! value type the storefront renders from request parameters.

pub mod nav;
pub mod overlay;
pub mod tabs;

pub use nav::{DEFAULT_STICKY_THRESHOLD, HeaderState, MenuToggle, StickyHeader};
pub use overlay::{Overlay, OverlayAction};
pub use tabs::TabSet;

/// Errors raised by UI state transitions.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UiError {
    /// No tab with this key exists.
    #[error("unknown configurator tab '{0}'")]
    UnknownTab(String),
}
