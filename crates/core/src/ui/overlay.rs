//! Modal overlays (cart panel, error dialog).

use serde::Deserialize;

/// Control event sent by an overlay's buttons and backdrop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayAction {
    /// The opener was clicked.
    Open,
    /// The explicit close control was clicked.
    #[default]
    Close,
    /// The backdrop itself (not the content) was clicked.
    Backdrop,
}

/// An overlay that opens on demand and closes via its close control or a
/// click on its backdrop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlay {
    open: bool,
}

impl Overlay {
    #[must_use]
    pub const fn new(open: bool) -> Self {
        Self { open }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn open(&mut self) {
        self.open = true;
    }

    /// Close via the explicit close control.
    pub const fn close(&mut self) {
        self.open = false;
    }

    /// Handle a click inside the overlay; only a click on the backdrop
    /// itself (not on the content) closes it.
    pub const fn dismiss(&mut self, clicked_backdrop: bool) {
        if clicked_backdrop {
            self.open = false;
        }
    }

    /// Apply a control event.
    pub const fn handle(&mut self, action: OverlayAction) {
        match action {
            OverlayAction::Open => self.open(),
            OverlayAction::Close => self.close(),
            OverlayAction::Backdrop => self.dismiss(true),
        }
    }

    /// Whether page scrolling should be locked while this overlay shows.
    #[must_use]
    pub const fn locks_scroll(&self) -> bool {
        self.open
    }
}
