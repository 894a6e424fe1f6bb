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

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectAction {
    None,
    Redraw,
    /// A selection was committed and should be surfaced to the host. In
    /// controlled mode the host reacts by pushing the new key back via
    /// [`SelectView::set_selected`].
    SelectionChanged(Option<String>),
}

#[derive(Clone, Debug)]
pub struct SelectViewOptions {
    pub placeholder: String,
    pub empty_text: String,
    pub trigger: TriggerMode,
    /// Cap on visible list rows; longer lists scroll.
    pub max_rows: u16,
    pub side: Side,
    pub overlay_width_cap: u16,
    pub edge_padding: u16,
    pub hover_close_delay: Duration,
    pub auto_focus: bool,
    pub disabled: bool,
    pub show_scrollbar: bool,
}

impl Default for SelectViewOptions {
    fn default() -> Self {
        Self {
            placeholder: "Select…".to_string(),
            empty_text: "(no options)".to_string(),
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

/// The plain select: a trigger that opens a floating list with keyboard
/// navigation and single-selection commit. Typed characters are ignored; for
/// live filtering use [`SearchableSelectView`](crate::searchable::SearchableSelectView).
///
/// Render in two phases: [`render`](Self::render) paints the trigger (and
/// records it as the overlay anchor), [`render_overlay`](Self::render_overlay)
/// is called after the rest of the frame so the floating list paints above
/// everything and is never clipped by the trigger's surroundings.
pub struct SelectView {
    core: SelectCore,
    positioner: OverlayPositioner,
    viewport: ListViewport,
    options: SelectViewOptions,
    bindings: NavBindings,
    focused: bool,
    trigger_area: Rect,
    overlay_area: Rect,
    rows_area: Rect,
}

impl Default for SelectView {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectView {
    pub fn new() -> Self {
        Self::with_options(SelectViewOptions::default())
    }

    /// Uncontrolled: the widget owns the selected key.
    pub fn with_options(options: SelectViewOptions) -> Self {
        let selection = SelectionController::uncontrolled(None);
        Self::build(options, selection)
    }

    pub fn uncontrolled(options: SelectViewOptions, initial: Option<&str>) -> Self {
        Self::build(options, SelectionController::uncontrolled(initial))
    }

    /// Controlled: the host owns the selected key and pushes updates via
    /// [`set_selected`](Self::set_selected) in response to
    /// [`SelectAction::SelectionChanged`].
    pub fn controlled(options: SelectViewOptions, initial: Option<&str>) -> Self {
        Self::build(options, SelectionController::controlled(initial))
    }

    fn build(options: SelectViewOptions, selection: SelectionController) -> Self {
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
            bindings: NavBindings::list(),
            focused,
            trigger_area: Rect::default(),
            overlay_area: Rect::default(),
            rows_area: Rect::default(),
        }
    }

    pub fn options(&self) -> &SelectViewOptions {
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

    pub fn selected_key(&self) -> Option<&str> {
        self.core.selected_key()
    }

    pub fn set_selected(&mut self, key: Option<&str>) {
        self.core.set_selected(key);
    }

    pub fn select_key(&mut self, key: Option<&str>) -> SelectAction {
        if self.core.select_key(key) {
            SelectAction::SelectionChanged(key.map(str::to_string))
        } else {
            SelectAction::None
        }
    }

    pub fn focused_key(&self) -> Option<&str> {
        self.core.focused_key()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Keyboard focus is app-managed (the widget cannot know the rest of the
    /// layout); an unfocused select ignores key events.
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
            InputEvent::Paste(_) => SelectAction::None,
        }
    }

    /// Advances the hover clock. Call once per frame in hover mode; a no-op
    /// otherwise.
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
        match key.code {
            // Space is trigger activation, like a press.
            KeyCode::Char(' ') if !key.modifiers.ctrl && !key.modifiers.alt => {
                redraw_if(self.core.toggle())
            }
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
                // Validated outside press: primary button, inside the frame,
                // on neither trigger nor overlay. Hover mode only closes on
                // dwell exit.
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

    /// Key and disabled flag of the row under `pos`, using the layout of the
    /// last render pass.
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

    /// Paints the trigger and records `area` as the overlay anchor.
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

    /// Paints the floating list. Call after everything else in the frame so
    /// the list is drawn on top. Renders nothing until the positioner has a
    /// valid geometry for the current anchor and frame.
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
            .unwrap_or_else(|| render::display_width(&self.options.empty_text));
        let scrollbar_w = u16::from(self.options.show_scrollbar);
        // mark column + borders (+ scrollbar)
        let content_w = widest + 2 + 2 + scrollbar_w;
        let desired_rows = (total.max(1)).min(self.options.max_rows as usize) as u16;
        let desired_h = desired_rows + 2;

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

        if total == 0 {
            self.rows_area = Rect::default();
            render::render_str_clipped(
                inner.x,
                inner.y,
                inner.width,
                buf,
                &self.options.empty_text,
                theme.placeholder,
            );
            return;
        }

        let show_scrollbar = self.options.show_scrollbar && total > inner.height as usize;
        let rows_w = inner.width - u16::from(show_scrollbar && inner.width > 1);
        self.rows_area = Rect::new(inner.x, inner.y, rows_w, inner.height);

        self.viewport.set_max_rows(inner.height as usize);
        let focused_idx = self.core.focused_index();
        self.viewport.follow(focused_idx, total);

        let selected = self.core.selected_key();
        let focused = self.core.focused_key();
        for (slot, idx) in self.viewport.range(total).enumerate() {
            let item = visible[idx];
            let y = inner.y + slot as u16;
            let is_selected = selected == Some(item.key.as_str());
            let is_focused = focused == Some(item.key.as_str());
            let style = if item.disabled {
                theme.row_disabled
            } else if is_focused {
                theme.row_focused
            } else {
                theme.row
            };
            buf.set_style(Rect::new(inner.x, y, rows_w, 1), style);

            let mark_style = if is_selected {
                theme.selected_mark.patch(style)
            } else {
                style
            };
            let mark = if is_selected { "✓ " } else { "  " };
            render::render_str_clipped(inner.x, y, rows_w.min(2), buf, mark, mark_style);
            render::render_str_clipped(
                inner.x + 2,
                y,
                rows_w.saturating_sub(2),
                buf,
                &item.text,
                style,
            );
        }

        if show_scrollbar {
            render::render_scrollbar(
                Rect::new(inner.right() - 1, inner.y, 1, inner.height),
                buf,
                self.viewport.offset(),
                inner.height as usize,
                total,
                theme.scrollbar,
            );
        }
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

    fn click(x: u16, y: u16) -> InputEvent {
        InputEvent::Mouse(MouseEvent {
            x,
            y,
            kind: MouseEventKind::Down(MouseButton::Left),
            modifiers: KeyModifiers::none(),
        })
    }

    fn moved(x: u16, y: u16) -> InputEvent {
        InputEvent::Mouse(MouseEvent {
            x,
            y,
            kind: MouseEventKind::Moved,
            modifiers: KeyModifiers::none(),
        })
    }

    fn fruit_view() -> SelectView {
        let mut view = SelectView::with_options(SelectViewOptions {
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

    fn rendered(view: &mut SelectView) -> Buffer {
        let frame = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(frame);
        let theme = Theme::default();
        view.render(Rect::new(2, 1, 20, 1), &mut buf, &theme);
        view.render_overlay(frame, &mut buf, &theme);
        buf
    }

    #[test]
    fn enter_opens_then_commits() {
        let mut view = fruit_view();
        let now = Instant::now();

        assert_eq!(view.handle_event(key(KeyCode::Enter), now), SelectAction::Redraw);
        assert!(view.is_open());

        rendered(&mut view);
        assert_eq!(view.handle_event(key(KeyCode::Down), now), SelectAction::Redraw);
        let action = view.handle_event(key(KeyCode::Enter), now);
        assert_eq!(action, SelectAction::SelectionChanged(Some("b".to_string())));
        assert!(!view.is_open());
        assert_eq!(view.selected_key(), Some("b"));
    }

    #[test]
    fn arrow_down_while_closed_opens() {
        let mut view = fruit_view();
        let now = Instant::now();
        assert_eq!(view.handle_event(key(KeyCode::Down), now), SelectAction::Redraw);
        assert!(view.is_open());
    }

    #[test]
    fn unfocused_view_ignores_keys() {
        let mut view = fruit_view();
        view.set_focused(false);
        let now = Instant::now();
        assert_eq!(view.handle_event(key(KeyCode::Enter), now), SelectAction::None);
        assert!(!view.is_open());
    }

    #[test]
    fn overlay_renders_only_after_positioning() {
        let mut view = fruit_view();
        let now = Instant::now();
        view.handle_event(key(KeyCode::Enter), now);

        // No trigger rendered yet: anchor unknown, nothing painted.
        let frame = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(frame);
        let theme = Theme::default();
        view.render_overlay(frame, &mut buf, &theme);
        assert_eq!(view.overlay_area, Rect::default());

        // After the trigger pass the overlay lands below the anchor.
        rendered(&mut view);
        assert_ne!(view.overlay_area, Rect::default());
        assert_eq!(view.overlay_area.y, 2);
    }

    #[test]
    fn click_on_trigger_toggles() {
        let mut view = fruit_view();
        let now = Instant::now();
        rendered(&mut view);
        assert_eq!(view.handle_event(click(5, 1), now), SelectAction::Redraw);
        assert!(view.is_open());
        rendered(&mut view);
        assert_eq!(view.handle_event(click(5, 1), now), SelectAction::Redraw);
        assert!(!view.is_open());
    }

    #[test]
    fn click_outside_closes_in_click_mode() {
        let mut view = fruit_view();
        let now = Instant::now();
        view.handle_event(key(KeyCode::Enter), now);
        rendered(&mut view);
        assert_eq!(view.handle_event(click(50, 15), now), SelectAction::Redraw);
        assert!(!view.is_open());
    }

    #[test]
    fn click_on_row_commits_it() {
        let mut view = fruit_view();
        let now = Instant::now();
        view.handle_event(key(KeyCode::Enter), now);
        rendered(&mut view);

        // Rows start one cell inside the overlay border.
        let rows = view.rows_area;
        let action = view.handle_event(click(rows.x + 1, rows.y + 2), now);
        assert_eq!(action, SelectAction::SelectionChanged(Some("c".to_string())));
        assert!(!view.is_open());
    }

    #[test]
    fn click_on_disabled_row_does_nothing() {
        let mut view = SelectView::with_options(SelectViewOptions {
            auto_focus: true,
            ..Default::default()
        });
        view.set_items(vec![
            SelectItem::new("a", "Apple"),
            SelectItem::new("b", "Banana").disabled(true),
        ]);
        let now = Instant::now();
        view.handle_event(key(KeyCode::Enter), now);
        rendered(&mut view);

        let rows = view.rows_area;
        let action = view.handle_event(click(rows.x + 1, rows.y + 1), now);
        assert_eq!(action, SelectAction::None);
        assert!(view.is_open());
        assert_eq!(view.selected_key(), None);
    }

    #[test]
    fn hover_mode_opens_on_pointer_and_survives_the_gap() {
        let mut view = SelectView::with_options(SelectViewOptions {
            trigger: TriggerMode::Hover,
            auto_focus: true,
            ..Default::default()
        });
        view.set_items(vec![SelectItem::new("a", "Apple")]);
        let now = Instant::now();
        rendered(&mut view);

        assert_eq!(view.handle_event(moved(5, 1), now), SelectAction::Redraw);
        assert!(view.is_open());
        rendered(&mut view);

        // Leave, then re-enter the overlay inside the debounce window.
        view.handle_event(moved(59, 19), now);
        let overlay = view.overlay_area;
        view.handle_event(
            moved(overlay.x + 1, overlay.y + 1),
            now + Duration::from_millis(50),
        );
        assert_eq!(view.tick(now + Duration::from_secs(5)), SelectAction::None);
        assert!(view.is_open());
    }

    #[test]
    fn hover_mode_closes_after_dwell_exit() {
        let mut view = SelectView::with_options(SelectViewOptions {
            trigger: TriggerMode::Hover,
            auto_focus: true,
            ..Default::default()
        });
        view.set_items(vec![SelectItem::new("a", "Apple")]);
        let now = Instant::now();
        rendered(&mut view);

        view.handle_event(moved(5, 1), now);
        view.handle_event(moved(59, 19), now);
        assert_eq!(
            view.tick(now + Duration::from_millis(200)),
            SelectAction::Redraw
        );
        assert!(!view.is_open());
    }

    #[test]
    fn hover_mode_ignores_outside_clicks() {
        let mut view = SelectView::with_options(SelectViewOptions {
            trigger: TriggerMode::Hover,
            auto_focus: true,
            ..Default::default()
        });
        view.set_items(vec![SelectItem::new("a", "Apple")]);
        let now = Instant::now();
        rendered(&mut view);
        view.handle_event(moved(5, 1), now);
        rendered(&mut view);

        assert_eq!(view.handle_event(click(50, 15), now), SelectAction::None);
        assert!(view.is_open());
    }

    #[test]
    fn selected_row_shows_a_mark() {
        let mut view = fruit_view();
        let now = Instant::now();
        view.handle_event(key(KeyCode::Enter), now);
        rendered(&mut view);
        view.handle_event(key(KeyCode::Enter), now); // commit "a"
        view.handle_event(key(KeyCode::Enter), now); // reopen
        let buf = rendered(&mut view);

        let rows = view.rows_area;
        let mark = buf.cell((rows.x, rows.y)).unwrap().symbol().to_string();
        assert_eq!(mark, "✓");
    }
}
