//! Committed-selection state.
//!
//! Whether the host or the widget owns the selected key is decided once at
//! construction, not re-checked per update:
//!
//! - [`SelectionController::uncontrolled`]: the controller stores the key and
//!   reports a change only when the key actually changes.
//! - [`SelectionController::controlled`]: the host owns the key; the
//!   controller only mirrors what the host last pushed via
//!   [`set_selected`](SelectionController::set_selected), and every commit is
//!   reported so the host can react (or ignore it).

use crate::registry::SelectItem;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Selection {
    Internal(Option<String>),
    External(Option<String>),
}

#[derive(Clone, Debug)]
pub struct SelectionController {
    selection: Selection,
}

impl SelectionController {
    pub fn uncontrolled(initial: Option<&str>) -> Self {
        Self {
            selection: Selection::Internal(initial.map(str::to_string)),
        }
    }

    pub fn controlled(initial: Option<&str>) -> Self {
        Self {
            selection: Selection::External(initial.map(str::to_string)),
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.selection, Selection::External(_))
    }

    pub fn selected_key(&self) -> Option<&str> {
        match &self.selection {
            Selection::Internal(k) | Selection::External(k) => k.as_deref(),
        }
    }

    /// Host-side update. In controlled mode this is how the authoritative key
    /// reaches the widget; in uncontrolled mode it sets the stored key
    /// directly (programmatic selection without commit side effects).
    pub fn set_selected(&mut self, key: Option<&str>) {
        let key = key.map(str::to_string);
        match &mut self.selection {
            Selection::Internal(k) | Selection::External(k) => *k = key,
        }
    }

    /// Commits `item`. Returns whether a selection change should be reported.
    ///
    /// Disabled items are rejected silently. Uncontrolled commits of the
    /// already-selected key report nothing; controlled commits always report,
    /// since the host owns the state and must see each one.
    pub fn commit(&mut self, item: &SelectItem) -> bool {
        if item.disabled {
            return false;
        }
        match &mut self.selection {
            Selection::Internal(k) => {
                if k.as_deref() == Some(item.key.as_str()) {
                    return false;
                }
                *k = Some(item.key.clone());
                true
            }
            Selection::External(_) => true,
        }
    }

    /// Clears the selection. Reported under the same rules as [`commit`](Self::commit).
    pub fn clear(&mut self) -> bool {
        match &mut self.selection {
            Selection::Internal(k) => {
                if k.is_none() {
                    return false;
                }
                *k = None;
                true
            }
            Selection::External(_) => true,
        }
    }

    /// Display text for the current key, or `None` when nothing is selected
    /// or the key no longer matches an item (callers fall back to their
    /// placeholder; a stale key must never panic).
    pub fn selected_text<'a>(&self, items: &'a [SelectItem]) -> Option<&'a str> {
        let key = self.selected_key()?;
        items
            .iter()
            .find(|i| i.key == key)
            .map(|i| i.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(key: &str) -> SelectItem {
        SelectItem::new(key, key.to_uppercase())
    }

    #[test]
    fn uncontrolled_commit_updates_and_reports_once() {
        let mut s = SelectionController::uncontrolled(None);
        assert!(s.commit(&item("a")));
        assert_eq!(s.selected_key(), Some("a"));
        assert!(!s.commit(&item("a")));
        assert!(s.commit(&item("b")));
        assert_eq!(s.selected_key(), Some("b"));
    }

    #[test]
    fn controlled_commit_reports_but_does_not_mutate() {
        let mut s = SelectionController::controlled(Some("a"));
        assert!(s.commit(&item("b")));
        assert_eq!(s.selected_key(), Some("a"));
        s.set_selected(Some("b"));
        assert_eq!(s.selected_key(), Some("b"));
    }

    #[test]
    fn controlled_commit_of_current_key_still_reports() {
        let mut s = SelectionController::controlled(Some("b"));
        assert!(s.commit(&item("b")));
    }

    #[test]
    fn disabled_item_is_rejected() {
        let mut s = SelectionController::uncontrolled(None);
        assert!(!s.commit(&item("a").disabled(true)));
        assert_eq!(s.selected_key(), None);
    }

    #[test]
    fn unknown_key_resolves_to_no_text() {
        let s = SelectionController::uncontrolled(Some("ghost"));
        let items = vec![item("a")];
        assert_eq!(s.selected_text(&items), None);
    }

    #[test]
    fn clear_is_idempotent_when_uncontrolled() {
        let mut s = SelectionController::uncontrolled(Some("a"));
        assert!(s.clear());
        assert!(!s.clear());
    }
}
