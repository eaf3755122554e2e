//! Overlay query and the error overlay route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Query;
use serde::Deserialize;
use streuobst_core::ui::{Overlay, OverlayAction};

/// Overlay query parameters, shared by every overlay fragment route.
#[derive(Debug, Default, Deserialize)]
pub struct OverlayQuery {
    /// Control that triggered the request; a bare request renders closed.
    #[serde(default)]
    pub action: OverlayAction,
}

impl OverlayQuery {
    /// Overlay state after the requested action.
    #[must_use]
    pub const fn overlay(&self) -> Overlay {
        let mut overlay = Overlay::new(false);
        overlay.handle(self.action);
        overlay
    }
}

/// Error overlay fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/error_modal.html")]
pub struct ErrorOverlayTemplate {
    pub error_overlay: Overlay,
}

/// Open or close the error overlay (HTMX).
pub async fn error(Query(query): Query<OverlayQuery>) -> ErrorOverlayTemplate {
    ErrorOverlayTemplate {
        error_overlay: query.overlay(),
    }
}
