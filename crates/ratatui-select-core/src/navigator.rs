//! Keyboard focus over the visible subset.
//!
//! Focus is tracked by item *key*, not index: filtering reshuffles indices on
//! every keystroke, and a key survives that as long as the item stays
//! visible. The navigator never holds item data; callers pass the current
//! visible subset into every operation.

use crate::registry::SelectItem;

#[derive(Clone, Debug, Default)]
pub struct KeyboardNavigator {
    focused: Option<String>,
}

impl KeyboardNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_key(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn clear(&mut self) {
        self.focused = None;
    }

    /// Index of the focused item within `visible`, if it is there.
    pub fn focused_index(&self, visible: &[&SelectItem]) -> Option<usize> {
        let key = self.focused.as_deref()?;
        visible.iter().position(|i| i.key == key)
    }

    /// Moves focus to the next enabled item, wrapping past the end. From no
    /// focus, moves to the first enabled item.
    pub fn next(&mut self, visible: &[&SelectItem]) -> bool {
        self.step(visible, 1)
    }

    /// Moves focus to the previous enabled item, wrapping past the start.
    /// From no focus, moves to the last enabled item.
    pub fn previous(&mut self, visible: &[&SelectItem]) -> bool {
        self.step(visible, -1)
    }

    /// Jumps to the first enabled item; no-op when none is enabled.
    pub fn first(&mut self, visible: &[&SelectItem]) -> bool {
        match first_enabled(visible) {
            Some(idx) => self.set_to(visible[idx]),
            None => false,
        }
    }

    /// Jumps to the last enabled item; no-op when none is enabled.
    pub fn last(&mut self, visible: &[&SelectItem]) -> bool {
        match last_enabled(visible) {
            Some(idx) => self.set_to(visible[idx]),
            None => false,
        }
    }

    /// Focuses `key` if it is visible and enabled. Used when the pointer
    /// moves over a row.
    pub fn focus_key(&mut self, visible: &[&SelectItem], key: &str) -> bool {
        match visible.iter().find(|i| i.key == key) {
            Some(item) if !item.disabled => self.set_to(item),
            _ => false,
        }
    }

    /// Re-establishes the focus invariant after the visible subset changed:
    /// a focused key must reference a visible, enabled item. A violating (or
    /// absent) focus snaps to the first enabled item, or to `None` when the
    /// subset has no enabled item.
    pub fn revalidate(&mut self, visible: &[&SelectItem]) -> bool {
        if let Some(key) = self.focused.as_deref()
            && visible.iter().any(|i| i.key == key && !i.disabled)
        {
            return false;
        }
        let next = first_enabled(visible).map(|idx| visible[idx].key.clone());
        if next == self.focused {
            return false;
        }
        self.focused = next;
        true
    }

    /// Initial focus resolution on open: the selected item when it is visible
    /// and enabled, else the first enabled item, else nothing.
    pub fn reset_for_open(&mut self, visible: &[&SelectItem], selected: Option<&str>) {
        if let Some(key) = selected
            && let Some(item) = visible.iter().find(|i| i.key == key)
            && !item.disabled
        {
            self.focused = Some(item.key.clone());
            return;
        }
        self.focused = first_enabled(visible).map(|idx| visible[idx].key.clone());
    }

    fn step(&mut self, visible: &[&SelectItem], dir: i32) -> bool {
        let enabled: Vec<usize> = enabled_positions(visible);
        if enabled.is_empty() {
            return false;
        }

        let current = self.focused_index(visible);
        let target = match current {
            None => {
                if dir > 0 {
                    enabled[0]
                } else {
                    enabled[enabled.len() - 1]
                }
            }
            Some(cur) => {
                // Position of the focused row within the enabled run; the
                // focused item is always enabled per the invariant, but a
                // stale focus is tolerated by falling back to the nearest.
                let pos = enabled.iter().position(|&i| i == cur);
                match (pos, dir > 0) {
                    (Some(p), true) => enabled[(p + 1) % enabled.len()],
                    (Some(p), false) => enabled[(p + enabled.len() - 1) % enabled.len()],
                    (None, true) => enabled
                        .iter()
                        .copied()
                        .find(|&i| i > cur)
                        .unwrap_or(enabled[0]),
                    (None, false) => enabled
                        .iter()
                        .rev()
                        .copied()
                        .find(|&i| i < cur)
                        .unwrap_or(enabled[enabled.len() - 1]),
                }
            }
        };
        self.set_to(visible[target])
    }

    fn set_to(&mut self, item: &SelectItem) -> bool {
        if self.focused.as_deref() == Some(item.key.as_str()) {
            return false;
        }
        self.focused = Some(item.key.clone());
        true
    }
}

fn enabled_positions(visible: &[&SelectItem]) -> Vec<usize> {
    visible
        .iter()
        .enumerate()
        .filter(|(_, i)| !i.disabled)
        .map(|(idx, _)| idx)
        .collect()
}

fn first_enabled(visible: &[&SelectItem]) -> Option<usize> {
    visible.iter().position(|i| !i.disabled)
}

fn last_enabled(visible: &[&SelectItem]) -> Option<usize> {
    visible.iter().rposition(|i| !i.disabled)
}
