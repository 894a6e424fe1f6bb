use std::io;
use std::time::Duration;
use std::time::Instant;

use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui_select::crossterm_input;
use ratatui_select::registry::SelectItem;
use ratatui_select::select::TriggerMode;
use ratatui_select::select_view::SelectAction;
use ratatui_select::select_view::SelectView;
use ratatui_select::select_view::SelectViewOptions;
use ratatui_select::theme::Theme;

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let mut click_select = SelectView::with_options(SelectViewOptions {
        auto_focus: true,
        ..Default::default()
    });
    click_select.set_items(fruit_items());

    let mut hover_select = SelectView::with_options(SelectViewOptions {
        trigger: TriggerMode::Hover,
        placeholder: "Hover me…".to_string(),
        ..Default::default()
    });
    hover_select.set_items(fruit_items());

    let res = run(&mut terminal, &theme, &mut click_select, &mut hover_select);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

fn fruit_items() -> Vec<SelectItem> {
    vec![
        SelectItem::new("apple", "Apple"),
        SelectItem::new("banana", "Banana"),
        SelectItem::new("cherry", "Cherry"),
        SelectItem::new("durian", "Durian").disabled(true),
        SelectItem::new("elderberry", "Elderberry"),
        SelectItem::new("fig", "Fig"),
        SelectItem::new("grape", "Grape"),
        SelectItem::new("honeydew", "Honeydew"),
        SelectItem::new("kiwi", "Kiwi"),
        SelectItem::new("lychee", "Lychee"),
        SelectItem::new("mango", "Mango"),
    ]
}

fn run<B: ratatui::backend::Backend<Error = io::Error>>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    click_select: &mut SelectView,
    hover_select: &mut SelectView,
) -> io::Result<()> {
    let mut last_change = String::from("(nothing committed yet)");

    loop {
        terminal.draw(|f| {
            let area = f.area();
            let buf = f.buffer_mut();

            buf.set_span(
                2,
                1,
                &Span::styled(
                    "click-mode select (Tab to move focus, q to quit)",
                    Style::default(),
                ),
                area.width,
            );
            click_select.render(Rect::new(2, 2, 24, 1), buf, theme);

            buf.set_span(2, 5, &Span::styled("hover-mode select", Style::default()), area.width);
            hover_select.render(Rect::new(2, 6, 24, 1), buf, theme);

            buf.set_span(
                2,
                area.height.saturating_sub(2),
                &Span::styled(last_change.clone(), Style::default()),
                area.width,
            );

            // Overlays go last so they paint above everything else.
            click_select.render_overlay(area, buf, theme);
            hover_select.render_overlay(area, buf, theme);
        })?;

        let now = Instant::now();
        click_select.tick(now);
        hover_select.tick(now);

        if crossterm::event::poll(Duration::from_millis(30))? {
            let event = crossterm::event::read()?;
            if let Event::Key(key) = &event {
                if key.kind == KeyEventKind::Press {
                    if matches!(key.code, KeyCode::Char('q')) {
                        return Ok(());
                    }
                    if matches!(key.code, KeyCode::Tab) {
                        let focus_click = !click_select.is_focused();
                        click_select.set_focused(focus_click);
                        hover_select.set_focused(!focus_click);
                        continue;
                    }
                }
            }

            if let Some(ev) = crossterm_input::input_event_from_crossterm(event) {
                for action in [
                    click_select.handle_event(ev.clone(), now),
                    hover_select.handle_event(ev, now),
                ] {
                    if let SelectAction::SelectionChanged(key) = action {
                        last_change = format!("committed: {key:?}");
                    }
                }
            }
        }
    }
}
