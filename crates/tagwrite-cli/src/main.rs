use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use std::{
    env,
    fs::File,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};
use tagwrite_config::Config;
use tagwrite_engine::{
    ArrowKey, EditableSurface, KeyInput, KeyOutcome, MarkupBuffer, Placeholder, Session,
};
use tagwrite_syntax::Node;

struct App {
    session: Session<MarkupBuffer>,
    status: String,
}

impl App {
    fn new(config: &Config) -> Result<Self> {
        let session = config.session(MarkupBuffer::new())?;
        Ok(Self {
            session,
            status: String::new(),
        })
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('v') {
            self.paste("");
            return;
        }
        let Some(input) = key_input(key) else {
            return;
        };
        self.status = match self.session.handle_key(input) {
            KeyOutcome::Ignored => "Key ignored".to_string(),
            _ => String::new(),
        };
    }

    fn paste(&mut self, text: &str) {
        if self.session.handle_paste(text) == KeyOutcome::Suppressed {
            self.status = "Paste is not allowed here".to_string();
        }
    }

    fn markup(&self) -> String {
        self.session
            .surface()
            .map(EditableSurface::markup)
            .unwrap_or_default()
    }
}

/// Translates a terminal key event; `None` for releases and repeats that
/// the editor should not see.
fn key_input(key: KeyEvent) -> Option<KeyInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let input = match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyInput::Printable(c)
        }
        KeyCode::Backspace => KeyInput::Backspace,
        KeyCode::Tab => KeyInput::Tab,
        KeyCode::Enter => KeyInput::Enter,
        KeyCode::Up => KeyInput::Arrow(ArrowKey::Up),
        KeyCode::Down => KeyInput::Arrow(ArrowKey::Down),
        KeyCode::Left => KeyInput::Arrow(ArrowKey::Left),
        KeyCode::Right => KeyInput::Arrow(ArrowKey::Right),
        other => KeyInput::Other(other.to_string()),
    };
    Some(input)
}

/// Styled spans for the live markup: finalized tags highlighted, the draft
/// underlined, any other element flattened to its text.
fn markup_spans(markup: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    collect_spans(&tagwrite_syntax::parse(markup), &mut spans);
    spans
}

fn collect_spans(nodes: &[Node], spans: &mut Vec<Span<'static>>) {
    for node in nodes {
        match node {
            Node::Text(text) => spans.push(Span::raw(text.clone())),
            Node::Element(element) => match Placeholder::from_element(element) {
                Some(tag) if tag.is_finalized() => spans.push(Span::styled(
                    tag.display_text,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
                Some(draft) => spans.push(Span::styled(
                    draft.display_text,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::UNDERLINED),
                )),
                None => collect_spans(&element.children, spans),
            },
        }
    }
}

fn init_logging() -> Result<PathBuf> {
    let log_path = env::temp_dir().join("tagwrite-cli.log");
    let file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(log_path)
}

fn main() -> Result<()> {
    let log_path = init_logging()?;

    // Config from CLI args or the default location
    let args: Vec<String> = env::args().collect();
    let default_path = Config::config_path();

    let loaded = match args.len() {
        2 => Config::load_from_path(&args[1]),
        1 => Config::load(),
        _ => {
            eprintln!("Usage: {} [config.toml]", args[0]);
            process::exit(1);
        }
    };
    let config = match loaded {
        Ok(Some(config)) => config,
        Ok(None) => {
            eprintln!("Error: No config file found");
            eprintln!("Usage: {} [config.toml]", args[0]);
            eprintln!("Or create a config file at {}", default_path.display());
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let mut app = App::new(&config)?;
    info!("tagwrite-cli starting, logging to {}", log_path.display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.code == KeyCode::Esc => return Ok(()),
            Event::Key(key) => app.handle_key(key),
            Event::Paste(text) => app.paste(&text),
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .split(f.area());

    // Editor panel
    let mut spans = markup_spans(&app.markup());
    spans.push(Span::styled("▏", Style::default().fg(Color::Gray)));
    let editor = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Editor"))
        .wrap(Wrap { trim: false });
    f.render_widget(editor, chunks[0]);

    // Export panel
    let json = app
        .session
        .json()
        .unwrap_or_else(|e| format!("<failed to serialize: {e}>"));
    let export = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Plain: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(app.session.plain_text()),
        ]),
        Line::from(vec![
            Span::styled("HTML:  ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(app.session.html()),
        ]),
        Line::from(vec![
            Span::styled("JSON:  ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(json),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title("Export"))
    .wrap(Wrap { trim: false });
    f.render_widget(export, chunks[1]);

    // Instructions
    let help = Line::from(vec![
        Span::raw("Esc: Quit | "),
        Span::raw("↑/↓: Choose | "),
        Span::raw("Tab/Enter: Accept | "),
        Span::raw("Space: Abandon tag"),
        Span::styled(
            format!("  {}", app.status),
            Style::default().fg(Color::Red),
        ),
    ]);
    f.render_widget(Paragraph::new(help), chunks[2]);

    render_autocomplete(f, app, chunks[0]);
}

fn render_autocomplete(f: &mut Frame, app: &App, editor: Rect) {
    let bridge = app.session.autocomplete();
    if !bridge.is_visible() {
        return;
    }

    let items: Vec<ListItem> = bridge
        .filtered()
        .iter()
        .map(|c| ListItem::new(c.label.clone()))
        .collect();
    let width = bridge
        .filtered()
        .iter()
        .map(|c| c.label.chars().count() as u16)
        .max()
        .unwrap_or(0)
        .saturating_add(4)
        .min(editor.width.saturating_sub(2));
    let height = (items.len() as u16)
        .saturating_add(2)
        .min(editor.height.saturating_sub(2));
    let area = Rect {
        x: editor.x + 1,
        y: editor.y + 2,
        width,
        height,
    }
    .intersection(f.area());

    let mut state = ListState::default().with_selected(bridge.highlighted());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Tags"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}
