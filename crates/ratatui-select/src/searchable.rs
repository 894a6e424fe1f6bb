use std::time::Duration;
use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Widget;
use ratatui_select_core::hover::DEFAULT_CLOSE_DELAY;
use ratatui_select_core::input::InputEvent;
use ratatui_select_core::input::KeyCode;
use ratatui_select_core::input::KeyEvent;
use ratatui_select_core::input::MouseButton;
use ratatui_select_core::input::MouseEvent;
use ratatui_select_core::input::MouseEventKind;
use ratatui_select_core::keymap::NavAction;
use ratatui_select_core::keymap::NavBindings;
use ratatui_select_core::overlay::OverlayOptions;
use ratatui_select_core::overlay::OverlayPositioner;
use ratatui_select_core::overlay::Side;
use ratatui_select_core::registry::SelectItem;
use ratatui_select_core::render;
use ratatui_select_core::select::SelectConfig;
use ratatui_select_core::select::SelectCore;
use ratatui_select_core::select::TriggerMode;
use ratatui_select_core::selection::SelectionController;
use ratatui_select_core::theme::Theme;
use ratatui_select_core::viewport::ListViewport;

use crate::select_view::SelectAction;

#[derive(Clone, Debug)]
pub struct SearchableSelectOptions {
    pub placeholder: String,
    pub query_hint: String,
    pub empty_text: String,
    pub trigger: TriggerMode,
    pub max_rows: u16,
    pub side: Side,
    pub overlay_width_cap: u16,
    pub edge_padding: u16,
    pub hover_close_delay: Duration,
    pub auto_focus: bool,
    pub disabled: bool,
    pub show_scrollbar: bool,
}

impl Default for SearchableSelectOptions {
    fn default() -> Self {
        Self {
            placeholder: "Select…".to_string(),
            query_hint: "Type to filter".to_string(),
            empty_text: "(no matches)".to_string(),
            trigger: TriggerMode::Click,
            max_rows: 8,
            side: Side::Below,
            overlay_width_cap: 40,
            edge_padding: 1,
            hover_close_delay: DEFAULT_CLOSE_DELAY,
            auto_focus: false,
            disabled: false,
            show_scrollbar: true,
        }
    }
}

/// The searchable select: like [`SelectView`](crate::select_view::SelectView)
/// but with a query line at the top of the floating list. Typed characters
/// filter the visible subset live; the query is transient and resets on
/// open, close and commit.
///
/// Because typed characters belong to the query, jump-to-edge moves are on
/// Ctrl+Home/Ctrl+End here (plain Home/End are left to the query editor).
pub struct SearchableSelectView {
    core: SelectCore,
    positioner: OverlayPositioner,
    viewport: ListViewport,
    options: SearchableSelectOptions,
    bindings: NavBindings,
    focused: bool,
    trigger_area: Rect,
    overlay_area: Rect,
    rows_area: Rect,
}

impl Default for SearchableSelectView {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchableSelectView {
    pub fn new() -> Self {
        Self::with_options(SearchableSelectOptions::default())
    }

    pub fn with_options(options: SearchableSelectOptions) -> Self {
        Self::build(options, SelectionController::uncontrolled(None))
    }

    pub fn uncontrolled(options: SearchableSelectOptions, initial: Option<&str>) -> Self {
        Self::build(options, SelectionController::uncontrolled(initial))
    }

    pub fn controlled(options: SearchableSelectOptions, initial: Option<&str>) -> Self {
        Self::build(options, SelectionController::controlled(initial))
    }

    fn build(options: SearchableSelectOptions, selection: SelectionController) -> Self {
        let config = SelectConfig {
            trigger: options.trigger,
            hover_close_delay: options.hover_close_delay,
            disabled: options.disabled,
        };
        let positioner = OverlayPositioner::new(OverlayOptions {
            preferred_side: options.side,
            width_cap: options.overlay_width_cap,
            edge_padding: options.edge_padding,
        });
        let viewport = ListViewport::new(options.max_rows as usize);
        let focused = options.auto_focus;
        Self {
            core: SelectCore::new(config, selection),
            positioner,
            viewport,
            options,
            bindings: NavBindings::searchable(),
            focused,
            trigger_area: Rect::default(),
            overlay_area: Rect::default(),
            rows_area: Rect::default(),
        }
    }

    pub fn options(&self) -> &SearchableSelectOptions {
        &self.options
    }

    pub fn set_bindings(&mut self, bindings: NavBindings) {
        self.bindings = bindings;
    }

    // --- state passthrough -----------------------------------------------

    pub fn set_items(&mut self, items: Vec<SelectItem>) {
        self.core.set_items(items);
    }

    pub fn register_item(
        &mut self,
        key: impl Into<String>,
        text: impl Into<String>,
        disabled: bool,
    ) {
        self.core.register_item(key, text, disabled);
    }

    pub fn unregister_item(&mut self, key: &str) {
        self.core.unregister_item(key);
    }

    pub fn is_open(&self) -> bool {
        self.core.is_open()
    }

    pub fn query(&self) -> &str {
        self.core.query()
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.core.selected_key()
    }

    pub fn set_selected(&mut self, key: Option<&str>) {
        self.core.set_selected(key);
    }

    pub fn focused_key(&self) -> Option<&str> {
        self.core.focused_key()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    // --- events ----------------------------------------------------------

    pub fn handle_event(&mut self, event: InputEvent, now: Instant) -> SelectAction {
        if self.core.is_disabled() {
            return SelectAction::None;
        }
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse, now),
            InputEvent::Paste(text) => self.handle_paste(&text),
        }
    }

    pub fn tick(&mut self, now: Instant) -> SelectAction {
        redraw_if(self.core.tick(now))
    }

    fn handle_key(&mut self, key: KeyEvent) -> SelectAction {
        if !self.focused {
            return SelectAction::None;
        }
        if let Some(action) = self.bindings.action_for(&key) {
            return self.apply_nav(action);
        }
        if key.modifiers.ctrl || key.modifiers.alt {
            return SelectAction::None;
        }
        match key.code {
            KeyCode::Char(c) => {
                // Typing on a closed trigger opens and starts filtering.
                let opened = self.core.open();
                let typed = self.core.push_query_char(c);
                redraw_if(opened || typed)
            }
            KeyCode::Backspace => redraw_if(self.core.pop_query_char()),
            _ => SelectAction::None,
        }
    }

    fn apply_nav(&mut self, action: NavAction) -> SelectAction {
        match action {
            NavAction::Next => redraw_if(self.core.focus_next()),
            NavAction::Previous => redraw_if(self.core.focus_previous()),
            NavAction::First => redraw_if(self.core.focus_first()),
            NavAction::Last => redraw_if(self.core.focus_last()),
            NavAction::Commit => {
                if self.core.is_open() {
                    self.commit_focused()
                } else {
                    redraw_if(self.core.open())
                }
            }
            NavAction::Dismiss => redraw_if(self.core.close()),
        }
    }

    fn handle_paste(&mut self, text: &str) -> SelectAction {
        if !self.focused {
            return SelectAction::None;
        }
        let opened = self.core.open();
        let mut typed = false;
        for c in text.chars().filter(|c| !c.is_control()) {
            typed |= self.core.push_query_char(c);
        }
        redraw_if(opened || typed)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> SelectAction {
        let pos = Position::new(mouse.x, mouse.y);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.trigger_area.contains(pos) {
                    self.focused = true;
                    return redraw_if(self.core.toggle());
                }
                if self.core.is_open() && self.overlay_area.contains(pos) {
                    if let Some((key, disabled)) = self.row_at(pos) {
                        if disabled {
                            return SelectAction::None;
                        }
                        self.core.focus_key(&key);
                        return self.commit_focused();
                    }
                    return SelectAction::None;
                }
                if self.core.is_open() && self.core.trigger_mode() == TriggerMode::Click {
                    return redraw_if(self.core.close());
                }
                SelectAction::None
            }
            MouseEventKind::ScrollUp if self.overlay_area.contains(pos) => {
                self.scroll_rows(-1)
            }
            MouseEventKind::ScrollDown if self.overlay_area.contains(pos) => {
                self.scroll_rows(1)
            }
            MouseEventKind::Moved => self.handle_pointer_moved(pos, now),
            _ => SelectAction::None,
        }
    }

    fn handle_pointer_moved(&mut self, pos: Position, now: Instant) -> SelectAction {
        let inside = self.trigger_area.contains(pos)
            || (self.core.is_open() && self.overlay_area.contains(pos));
        let mut changed = self.core.on_hover_change(inside, now);

        if self.core.is_open()
            && self.rows_area.contains(pos)
            && let Some((key, disabled)) = self.row_at(pos)
            && !disabled
        {
            changed |= self.core.focus_key(&key);
        }
        redraw_if(changed)
    }

    fn commit_focused(&mut self) -> SelectAction {
        match self.core.commit_focused() {
            Some(commit) if commit.changed => {
                SelectAction::SelectionChanged(Some(commit.key))
            }
            Some(_) => SelectAction::Redraw,
            None => SelectAction::None,
        }
    }

    fn scroll_rows(&mut self, delta: i32) -> SelectAction {
        let total = self.core.visible_items().len();
        self.viewport.scroll_by(delta, total);
        SelectAction::Redraw
    }

    fn row_at(&self, pos: Position) -> Option<(String, bool)> {
        if !self.rows_area.contains(pos) {
            return None;
        }
        let slot = (pos.y - self.rows_area.y) as usize;
        let visible = self.core.visible_items();
        let idx = self.viewport.range(visible.len()).start + slot;
        visible
            .get(idx)
            .map(|item| (item.key.clone(), item.disabled))
    }

    // --- rendering -------------------------------------------------------

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.trigger_area = area;
        if area.width == 0 || area.height == 0 {
            return;
        }

        let style = if self.core.is_disabled() {
            theme.trigger_disabled
        } else if self.focused {
            theme.trigger_focused
        } else {
            theme.trigger
        };
        buf.set_style(area, style);

        let (text, text_style) = match self.core.selected_text() {
            Some(text) => (text.to_string(), style),
            None => (self.options.placeholder.clone(), theme.placeholder),
        };
        let text_cols = area.width.saturating_sub(2);
        render::render_str_clipped(area.x, area.y, text_cols, buf, &text, text_style);

        if area.width >= 2 {
            let indicator = if self.core.is_open() { "▴" } else { "▾" };
            buf.set_stringn(area.right() - 1, area.y, indicator, 1, style);
        }
    }

    /// Floating list with the query line on top. Same two-phase contract as
    /// the plain select: nothing is painted until the positioner has valid
    /// geometry.
    pub fn render_overlay(&mut self, frame: Rect, buf: &mut Buffer, theme: &Theme) {
        if !self.core.is_open() {
            self.positioner.invalidate();
            self.overlay_area = Rect::default();
            self.rows_area = Rect::default();
            return;
        }

        let visible = self.core.visible_items();
        let total = visible.len();

        let widest = visible
            .iter()
            .map(|i| render::display_width(&i.text))
            .max()
            .unwrap_or(0)
            .max(render::display_width(&self.options.empty_text))
            .max(render::display_width(&self.options.query_hint));
        let scrollbar_w = u16::from(self.options.show_scrollbar);
        let content_w = widest + 2 + 2 + scrollbar_w;
        // query line + rows + borders
        let desired_rows = (total.max(1)).min(self.options.max_rows as usize) as u16;
        let desired_h = desired_rows + 3;

        let Some(geometry) =
            self.positioner
                .compute(self.trigger_area, frame, content_w, desired_h)
        else {
            self.overlay_area = Rect::default();
            self.rows_area = Rect::default();
            return;
        };

        let area = geometry.area;
        self.overlay_area = area;

        Clear.render(area, buf);
        buf.set_style(area, theme.overlay);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.overlay_border);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            self.rows_area = Rect::default();
            return;
        }

        self.render_query_line(inner, buf, theme);
        let list = Rect::new(
            inner.x,
            inner.y + 1,
            inner.width,
            inner.height.saturating_sub(1),
        );
        if list.height == 0 {
            self.rows_area = Rect::default();
            return;
        }

        if total == 0 {
            self.rows_area = Rect::default();
            render::render_str_clipped(
                list.x,
                list.y,
                list.width,
                buf,
                &self.options.empty_text,
                theme.placeholder,
            );
            return;
        }

        let show_scrollbar = self.options.show_scrollbar && total > list.height as usize;
        let rows_w = list.width - u16::from(show_scrollbar && list.width > 1);
        self.rows_area = Rect::new(list.x, list.y, rows_w, list.height);

        self.viewport.set_max_rows(list.height as usize);
        let focused_idx = self.core.focused_index();
        self.viewport.follow(focused_idx, total);

        let selected = self.core.selected_key();
        let focused = self.core.focused_key();
        for (slot, idx) in self.viewport.range(total).enumerate() {
            let item = visible[idx];
            let y = list.y + slot as u16;
            let is_selected = selected == Some(item.key.as_str());
            let is_focused = focused == Some(item.key.as_str());
            let style = if item.disabled {
                theme.row_disabled
            } else if is_focused {
                theme.row_focused
            } else {
                theme.row
            };
            buf.set_style(Rect::new(list.x, y, rows_w, 1), style);

            let mark_style = if is_selected {
                theme.selected_mark.patch(style)
            } else {
                style
            };
            let mark = if is_selected { "✓ " } else { "  " };
            render::render_str_clipped(list.x, y, rows_w.min(2), buf, mark, mark_style);
            render::render_str_clipped(
                list.x + 2,
                y,
                rows_w.saturating_sub(2),
                buf,
                &item.text,
                style,
            );
        }

        if show_scrollbar {
            render::render_scrollbar(
                Rect::new(list.right() - 1, list.y, 1, list.height),
                buf,
                self.viewport.offset(),
                list.height as usize,
                total,
                theme.scrollbar,
            );
        }
    }

    fn render_query_line(&self, inner: Rect, buf: &mut Buffer, theme: &Theme) {
        let query = self.core.query();
        if query.is_empty() {
            render::render_str_clipped(
                inner.x,
                inner.y,
                inner.width,
                buf,
                &self.options.query_hint,
                theme.query_hint,
            );
            return;
        }
        render::render_str_clipped(inner.x, inner.y, inner.width, buf, query, theme.query);
        // Caret sits after the text; editing is append-only.
        let caret_x = inner.x + render::display_width(query).min(inner.width - 1);
        buf.set_stringn(caret_x, inner.y, "▏", 1, theme.query);
    }
}

fn redraw_if(changed: bool) -> SelectAction {
    if changed {
        SelectAction::Redraw
    } else {
        SelectAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui_select_core::input::KeyModifiers;

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code))
    }

    fn ctrl(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code).with_modifiers(KeyModifiers {
            shift: false,
            ctrl: true,
            alt: false,
        }))
    }

    fn type_str(view: &mut SearchableSelectView, s: &str, now: Instant) {
        for c in s.chars() {
            view.handle_event(key(KeyCode::Char(c)), now);
        }
    }

    fn fruit_view() -> SearchableSelectView {
        let mut view = SearchableSelectView::with_options(SearchableSelectOptions {
            auto_focus: true,
            ..Default::default()
        });
        view.set_items(vec![
            SelectItem::new("a", "Apple"),
            SelectItem::new("b", "Banana"),
            SelectItem::new("c", "Cherry"),
        ]);
        view
    }

    fn rendered(view: &mut SearchableSelectView) -> Buffer {
        let frame = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(frame);
        let theme = Theme::default();
        view.render(Rect::new(2, 1, 20, 1), &mut buf, &theme);
        view.render_overlay(frame, &mut buf, &theme);
        buf
    }

    #[test]
    fn typing_while_closed_opens_and_filters() {
        let mut view = fruit_view();
        let now = Instant::now();
        type_str(&mut view, "an", now);
        assert!(view.is_open());
        assert_eq!(view.query(), "an");
        assert_eq!(view.focused_key(), Some("b"));
    }

    #[test]
    fn full_match_round_trip_commits_and_resets_query() {
        let mut view = fruit_view();
        let now = Instant::now();
        view.handle_event(key(KeyCode::Enter), now);
        type_str(&mut view, "cherry", now);
        let action = view.handle_event(key(KeyCode::Enter), now);
        assert_eq!(action, SelectAction::SelectionChanged(Some("c".to_string())));
        assert_eq!(view.query(), "");
        assert!(!view.is_open());
        assert_eq!(view.selected_key(), Some("c"));
    }

    #[test]
    fn backspace_widens_the_visible_set_again() {
        let mut view = fruit_view();
        let now = Instant::now();
        type_str(&mut view, "ba", now);
        assert_eq!(view.focused_key(), Some("b"));
        view.handle_event(key(KeyCode::Backspace), now);
        view.handle_event(key(KeyCode::Backspace), now);
        assert_eq!(view.query(), "");
        // All three visible again; focus kept where it was.
        assert_eq!(view.focused_key(), Some("b"));
    }

    #[test]
    fn ctrl_home_and_end_jump_within_matches() {
        let mut view = fruit_view();
        let now = Instant::now();
        view.handle_event(key(KeyCode::Enter), now);
        view.handle_event(ctrl(KeyCode::End), now);
        assert_eq!(view.focused_key(), Some("c"));
        view.handle_event(ctrl(KeyCode::Home), now);
        assert_eq!(view.focused_key(), Some("a"));
    }

    #[test]
    fn ctrl_home_while_closed_opens_first() {
        let mut view = fruit_view();
        let now = Instant::now();
        view.handle_event(ctrl(KeyCode::Home), now);
        assert!(view.is_open());
        assert_eq!(view.focused_key(), Some("a"));
    }

    #[test]
    fn no_match_shows_empty_state_and_enter_keeps_it_open() {
        let mut view = fruit_view();
        let now = Instant::now();
        type_str(&mut view, "zzz", now);
        assert_eq!(view.focused_key(), None);
        let buf = rendered(&mut view);
        assert_eq!(view.handle_event(key(KeyCode::Enter), now), SelectAction::None);
        assert!(view.is_open());

        let overlay = view.overlay_area;
        let cell = buf.cell((overlay.x + 1, overlay.y + 2)).unwrap();
        assert_eq!(cell.symbol(), "(");
    }

    #[test]
    fn paste_appends_to_the_query() {
        let mut view = fruit_view();
        let now = Instant::now();
        view.handle_event(InputEvent::Paste("che".to_string()), now);
        assert!(view.is_open());
        assert_eq!(view.query(), "che");
        assert_eq!(view.focused_key(), Some("c"));
    }

    #[test]
    fn diacritics_in_the_query_still_match() {
        let mut view = SearchableSelectView::with_options(SearchableSelectOptions {
            auto_focus: true,
            ..Default::default()
        });
        view.set_items(vec![SelectItem::new("j", "José")]);
        let now = Instant::now();
        type_str(&mut view, "jose", now);
        assert_eq!(view.focused_key(), Some("j"));
    }

    #[test]
    fn query_line_renders_hint_then_text() {
        let mut view = fruit_view();
        let now = Instant::now();
        view.handle_event(key(KeyCode::Enter), now);
        let buf = rendered(&mut view);
        let overlay = view.overlay_area;
        let cell = buf.cell((overlay.x + 1, overlay.y + 1)).unwrap();
        assert_eq!(cell.symbol(), "T"); // "Type to filter"

        type_str(&mut view, "ba", now);
        let buf = rendered(&mut view);
        let overlay = view.overlay_area;
        let cell = buf.cell((overlay.x + 1, overlay.y + 1)).unwrap();
        assert_eq!(cell.symbol(), "b");
    }
}
