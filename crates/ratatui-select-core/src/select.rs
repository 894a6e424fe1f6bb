//! The select machine: open/close lifecycle, query ownership, and commit
//! semantics, composed from the registry, filter, selection controller,
//! navigator, and hover-intent primitives.
//!
//! This is headless state. The facade crate wires it to input events and
//! renders it; everything here is driven by explicit method calls so it can
//! be tested without a terminal.

use std::time::Duration;
use std::time::Instant;

use crate::filter;
use crate::hover::HoverIntent;
use crate::navigator::KeyboardNavigator;
use crate::registry::ItemRegistry;
use crate::registry::SelectItem;
use crate::selection::SelectionController;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriggerMode {
    /// Open on trigger activation; a validated press outside trigger and
    /// list closes.
    #[default]
    Click,
    /// Open while the pointer dwells on trigger or list; leaving both closes
    /// after the debounce window. Outside presses do not close.
    Hover,
}

#[derive(Clone, Debug)]
pub struct SelectConfig {
    pub trigger: TriggerMode,
    pub hover_close_delay: Duration,
    pub disabled: bool,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            trigger: TriggerMode::Click,
            hover_close_delay: crate::hover::DEFAULT_CLOSE_DELAY,
            disabled: false,
        }
    }
}

/// Outcome of a commit: the committed key, and whether the selection change
/// should be surfaced to the host (see `SelectionController` for the
/// controlled/uncontrolled reporting rules).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    pub key: String,
    pub changed: bool,
}

pub struct SelectCore {
    registry: ItemRegistry,
    explicit: Option<Vec<SelectItem>>,
    selection: SelectionController,
    navigator: KeyboardNavigator,
    hover: HoverIntent,
    query: String,
    open: bool,
    config: SelectConfig,
}

impl SelectCore {
    pub fn new(config: SelectConfig, selection: SelectionController) -> Self {
        let hover = HoverIntent::new(config.hover_close_delay);
        Self {
            registry: ItemRegistry::new(),
            explicit: None,
            selection,
            navigator: KeyboardNavigator::new(),
            hover,
            query: String::new(),
            open: false,
            config,
        }
    }

    pub fn uncontrolled(config: SelectConfig, initial: Option<&str>) -> Self {
        Self::new(config, SelectionController::uncontrolled(initial))
    }

    pub fn controlled(config: SelectConfig, initial: Option<&str>) -> Self {
        Self::new(config, SelectionController::controlled(initial))
    }

    // --- items -----------------------------------------------------------

    /// The full item set: the explicit list when one was supplied, else the
    /// registry.
    pub fn items(&self) -> &[SelectItem] {
        match &self.explicit {
            Some(items) => items,
            None => self.registry.items(),
        }
    }

    /// Supplies an explicit item list. It takes precedence over the
    /// registry from now on; registration calls keep working but no longer
    /// affect what is shown.
    pub fn set_items(&mut self, items: Vec<SelectItem>) {
        self.explicit = Some(items);
        self.refresh_focus();
    }

    pub fn register_item(
        &mut self,
        key: impl Into<String>,
        text: impl Into<String>,
        disabled: bool,
    ) {
        self.registry.register(key, text, disabled);
        if self.explicit.is_none() {
            self.refresh_focus();
        }
    }

    pub fn unregister_item(&mut self, key: &str) {
        self.registry.unregister(key);
        if self.explicit.is_none() {
            self.refresh_focus();
        }
    }

    /// The visible subset under the current query, in item order.
    pub fn visible_items(&self) -> Vec<&SelectItem> {
        filter::filter_items(self.items(), &self.query)
    }

    // --- open/close ------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) -> bool {
        if self.open || self.config.disabled {
            return false;
        }
        self.query.clear();
        self.open = true;
        let visible = Self::visible_of(&self.explicit, &self.registry, &self.query);
        self.navigator
            .reset_for_open(&visible, self.selection.selected_key());
        #[cfg(feature = "tracing")]
        tracing::debug!(focused = ?self.navigator.focused_key(), "select opened");
        true
    }

    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.query.clear();
        self.navigator.clear();
        self.hover.cancel();
        #[cfg(feature = "tracing")]
        tracing::debug!("select closed");
        true
    }

    pub fn toggle(&mut self) -> bool {
        if self.open { self.close() } else { self.open() }
    }

    // --- focus -----------------------------------------------------------

    pub fn focused_key(&self) -> Option<&str> {
        self.navigator.focused_key()
    }

    pub fn focused_index(&self) -> Option<usize> {
        let visible = Self::visible_of(&self.explicit, &self.registry, &self.query);
        self.navigator.focused_index(&visible)
    }

    /// Navigation requests arriving while closed open the list first, as if
    /// the open transition had just completed, then apply.
    pub fn focus_next(&mut self) -> bool {
        self.nav(|nav, visible| nav.next(visible))
    }

    pub fn focus_previous(&mut self) -> bool {
        self.nav(|nav, visible| nav.previous(visible))
    }

    pub fn focus_first(&mut self) -> bool {
        self.nav(|nav, visible| nav.first(visible))
    }

    pub fn focus_last(&mut self) -> bool {
        self.nav(|nav, visible| nav.last(visible))
    }

    /// Pointer-driven focus; only visible, enabled items take it.
    pub fn focus_key(&mut self, key: &str) -> bool {
        if !self.open || self.config.disabled {
            return false;
        }
        let visible = Self::visible_of(&self.explicit, &self.registry, &self.query);
        self.navigator.focus_key(&visible, key)
    }

    fn nav(&mut self, f: impl FnOnce(&mut KeyboardNavigator, &[&SelectItem]) -> bool) -> bool {
        if self.config.disabled {
            return false;
        }
        let opened = self.open();
        let visible = Self::visible_of(&self.explicit, &self.registry, &self.query);
        let moved = f(&mut self.navigator, &visible);
        opened || moved
    }

    // --- query -----------------------------------------------------------

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the query and repairs focus against the new visible subset.
    /// Only meaningful while open; the query is transient filter state, not
    /// a value.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        if !self.open {
            return false;
        }
        let query = query.into();
        if query == self.query {
            return false;
        }
        self.query = query;
        self.refresh_focus();
        true
    }

    pub fn push_query_char(&mut self, c: char) -> bool {
        if !self.open {
            return false;
        }
        self.query.push(c);
        self.refresh_focus();
        true
    }

    pub fn pop_query_char(&mut self) -> bool {
        if !self.open || self.query.pop().is_none() {
            return false;
        }
        self.refresh_focus();
        true
    }

    // --- selection -------------------------------------------------------

    pub fn selected_key(&self) -> Option<&str> {
        self.selection.selected_key()
    }

    pub fn is_controlled(&self) -> bool {
        self.selection.is_controlled()
    }

    /// Host-side selection update; no commit side effects (nothing closes,
    /// no query reset, nothing is reported back).
    pub fn set_selected(&mut self, key: Option<&str>) {
        self.selection.set_selected(key);
    }

    /// Display text of the selected item, `None` when nothing is selected or
    /// the key matches no item (callers show their placeholder).
    pub fn selected_text(&self) -> Option<&str> {
        self.selection.selected_text(self.items())
    }

    /// Commits the focused item: selection updated/reported per mode, query
    /// cleared, list closed. `None` when nothing is focused (or the control
    /// is closed/disabled) — no state changes then.
    pub fn commit_focused(&mut self) -> Option<Commit> {
        if !self.open || self.config.disabled {
            return None;
        }
        let key = self.navigator.focused_key()?.to_string();
        let visible = Self::visible_of(&self.explicit, &self.registry, &self.query);
        let item = visible.iter().find(|i| i.key == key)?;
        if item.disabled {
            return None;
        }
        let changed = self.selection.commit(item);
        self.close();
        #[cfg(feature = "tracing")]
        tracing::debug!(key = %key, changed, "selection committed");
        Some(Commit { key, changed })
    }

    /// Programmatic selection with commit side effects: `None` clears. A
    /// disabled target is rejected; an unknown key is accepted (the display
    /// falls back to the placeholder). Returns whether a change should be
    /// reported.
    pub fn select_key(&mut self, key: Option<&str>) -> bool {
        if self.config.disabled {
            return false;
        }
        let changed = match key {
            None => self.selection.clear(),
            Some(key) => {
                let found = self.items().iter().find(|i| i.key == key).cloned();
                match found {
                    Some(item) if item.disabled => return false,
                    Some(item) => self.selection.commit(&item),
                    None => {
                        self.selection.set_selected(Some(key));
                        true
                    }
                }
            }
        };
        self.close();
        changed
    }

    // --- hover / time ----------------------------------------------------

    pub fn trigger_mode(&self) -> TriggerMode {
        self.config.trigger
    }

    /// Hover transition from the trigger or the floating list (they share
    /// hover intent). Ignored outside hover mode. Returns whether the open
    /// state changed.
    pub fn on_hover_change(&mut self, hovering: bool, now: Instant) -> bool {
        if self.config.trigger != TriggerMode::Hover || self.config.disabled {
            return false;
        }
        if self.hover.on_hover_change(hovering, now) {
            return self.open();
        }
        false
    }

    /// Advances the hover clock; closes when the dwell-exit debounce has
    /// expired. The only timer in the control.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.config.trigger != TriggerMode::Hover || !self.open {
            return false;
        }
        if self.hover.poll_close(now) {
            return self.close();
        }
        false
    }

    // --- misc ------------------------------------------------------------

    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    /// Focus repair after anything reshaped the visible subset.
    fn refresh_focus(&mut self) {
        if !self.open {
            return;
        }
        let visible = Self::visible_of(&self.explicit, &self.registry, &self.query);
        self.navigator.revalidate(&visible);
    }

    fn visible_of<'a>(
        explicit: &'a Option<Vec<SelectItem>>,
        registry: &'a ItemRegistry,
        query: &'a str,
    ) -> Vec<&'a SelectItem> {
        let items = match explicit {
            Some(items) => items.as_slice(),
            None => registry.items(),
        };
        filter::filter_items(items, query)
    }
}
