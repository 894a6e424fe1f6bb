use std::io;
use std::time::Duration;
use std::time::Instant;

use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
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
use ratatui_select::searchable::SearchableSelectOptions;
use ratatui_select::searchable::SearchableSelectView;
use ratatui_select::select_view::SelectAction;
use ratatui_select::theme::Theme;

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let mut select = SearchableSelectView::with_options(SearchableSelectOptions {
        auto_focus: true,
        max_rows: 6,
        ..Default::default()
    });
    select.set_items(language_items());

    let res = run(&mut terminal, &theme, &mut select);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

fn language_items() -> Vec<SelectItem> {
    vec![
        SelectItem::new("c", "C"),
        SelectItem::new("cpp", "C++"),
        SelectItem::new("elixir", "Elixir"),
        SelectItem::new("erlang", "Erlang"),
        SelectItem::new("fortran", "Fortran").disabled(true),
        SelectItem::new("go", "Go"),
        SelectItem::new("haskell", "Haskell"),
        SelectItem::new("java", "Java"),
        SelectItem::new("javascript", "JavaScript"),
        SelectItem::new("ocaml", "OCaml"),
        SelectItem::new("python", "Python"),
        SelectItem::new("rust", "Rust"),
        SelectItem::new("zig", "Zig"),
    ]
}

fn run<B: ratatui::backend::Backend<Error = io::Error>>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    select: &mut SearchableSelectView,
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
                    "searchable select: Enter opens, type to filter, Ctrl+C quits",
                    Style::default(),
                ),
                area.width,
            );
            select.render(Rect::new(2, 2, 28, 1), buf, theme);

            buf.set_span(
                2,
                area.height.saturating_sub(2),
                &Span::styled(last_change.clone(), Style::default()),
                area.width,
            );

            select.render_overlay(area, buf, theme);
        })?;

        let now = Instant::now();
        select.tick(now);

        if crossterm::event::poll(Duration::from_millis(30))? {
            let event = crossterm::event::read()?;
            if let Event::Key(key) = &event
                && key.kind == KeyEventKind::Press
                && matches!(key.code, KeyCode::Char('c'))
                && key.modifiers.contains(KeyModifiers::CONTROL)
            {
                return Ok(());
            }

            if let Some(ev) = crossterm_input::input_event_from_crossterm(event)
                && let SelectAction::SelectionChanged(key) = select.handle_event(ev, now)
            {
                last_change = format!("committed: {key:?}");
            }
        }
    }
}
