use ratatui::style::Style;

#[derive(Clone, Debug)]
pub struct Theme {
    pub trigger: Style,
    pub trigger_focused: Style,
    pub trigger_disabled: Style,
    pub placeholder: Style,
    pub overlay: Style,
    pub overlay_border: Style,
    pub row: Style,
    pub row_focused: Style,
    pub row_disabled: Style,
    pub selected_mark: Style,
    pub query: Style,
    pub query_hint: Style,
    pub scrollbar: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Modifier;
        use ratatui::style::Stylize;

        Self {
            trigger: Style::default(),
            trigger_focused: Style::default().cyan(),
            trigger_disabled: Style::default().dark_gray(),
            placeholder: Style::default().dark_gray(),
            overlay: Style::default(),
            overlay_border: Style::default().dark_gray(),
            row: Style::default(),
            row_focused: Style::default().add_modifier(Modifier::REVERSED),
            row_disabled: Style::default()
                .dark_gray()
                .add_modifier(Modifier::CROSSED_OUT),
            selected_mark: Style::default().cyan(),
            query: Style::default(),
            query_hint: Style::default().dark_gray(),
            scrollbar: Style::default().dark_gray(),
        }
    }
}
