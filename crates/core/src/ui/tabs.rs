//! Configurator tab selection.

use super::UiError;

/// Ordered tab keys with exactly one active tab.
///
/// A tab and the panel with the same key are active together; activating a
/// tab deactivates every other tab and panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSet {
    keys: Vec<String>,
    active: usize,
}

impl TabSet {
    /// Build a tab set with the first tab active.
    ///
    /// Returns `None` when `keys` is empty.
    #[must_use]
    pub fn new<I, K>(keys: I) -> Option<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return None;
        }
        Some(Self { keys, active: 0 })
    }

    /// Make `key` the active tab.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownTab`] and keeps the current selection if no
    /// tab has this key.
    pub fn activate(&mut self, key: &str) -> Result<(), UiError> {
        let pos = self
            .keys
            .iter()
            .position(|k| k == key)
            .ok_or_else(|| UiError::UnknownTab(key.to_owned()))?;
        self.active = pos;
        Ok(())
    }

    /// Key of the active tab.
    #[must_use]
    pub fn active(&self) -> &str {
        self.keys.get(self.active).map_or("", String::as_str)
    }

    /// Whether the tab (and panel) with `key` is active.
    #[must_use]
    pub fn is_active(&self, key: &str) -> bool {
        self.active() == key
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tab_active_by_default() {
        let tabs = TabSet::new(["saefte", "pakete", "geschenke"]).unwrap();
        assert_eq!(tabs.active(), "saefte");
        assert!(tabs.is_active("saefte"));
        assert!(!tabs.is_active("pakete"));
    }

    #[test]
    fn test_activate_leaves_exactly_one_active() {
        let keys = ["saefte", "pakete", "geschenke"];
        let mut tabs = TabSet::new(keys).unwrap();
        tabs.activate("geschenke").unwrap();
        let active: Vec<_> = keys.into_iter().filter(|k| tabs.is_active(k)).collect();
        assert_eq!(active, ["geschenke"]);
    }

    #[test]
    fn test_unknown_tab_keeps_selection() {
        let mut tabs = TabSet::new(["saefte", "pakete"]).unwrap();
        tabs.activate("pakete").unwrap();
        assert_eq!(
            tabs.activate("kisten"),
            Err(UiError::UnknownTab("kisten".to_owned()))
        );
        assert_eq!(tabs.active(), "pakete");
    }

    #[test]
    fn test_empty_tab_set() {
        assert!(TabSet::new(Vec::<String>::new()).is_none());
    }
}
