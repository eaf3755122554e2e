//! Navigation bar state: mobile menu and sticky header.

/// Scroll offset (in CSS pixels) past which the header turns sticky.
pub const DEFAULT_STICKY_THRESHOLD: u32 = 500;

/// Mobile menu toggle.
///
/// The toggle button and the collapsible link list share one flag, so they
/// always carry the `open` class together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuToggle {
    open: bool,
}

impl MenuToggle {
    #[must_use]
    pub const fn new(open: bool) -> Self {
        Self { open }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the menu and return the new state.
    pub const fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }
}

/// How the header should look at a given scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderState {
    /// Header is pinned with a solid background (`sticky nav-bg`).
    pub sticky: bool,
    /// The decorative wave behind the header is shown.
    pub wave_visible: bool,
}

/// Sticky-header rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickyHeader {
    threshold: u32,
}

impl Default for StickyHeader {
    fn default() -> Self {
        Self::new(DEFAULT_STICKY_THRESHOLD)
    }
}

impl StickyHeader {
    #[must_use]
    pub const fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    #[must_use]
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Header state at `scroll_y`; sticky strictly past the threshold.
    #[must_use]
    pub const fn at(&self, scroll_y: u32) -> HeaderState {
        let sticky = scroll_y > self.threshold;
        HeaderState {
            sticky,
            wave_visible: !sticky,
        }
    }
}
