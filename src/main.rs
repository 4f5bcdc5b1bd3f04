//! docspy: scroll-spy, search and sidebar navigation for markdown docs.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use docspy::assets::FsImageSource;
use docspy::config::Config;
use docspy::controller::{Delays, DocsController, PageInput, PageOptions};
use docspy::error::Result;
use docspy::formats::{markdown::MarkdownFormat, Format};
use docspy::input::{self, Document};
use docspy::page_layout::Layout;
use docspy::search::{SearchIndex, SearchOutcome};
use docspy::settings::{FileStore, Settings};
use docspy::{theme, ui};
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Longest the loop blocks on input when no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(500);

#[derive(Parser)]
#[command(name = "docspy")]
#[command(about = "Read markdown documentation with a live table of contents", long_about = None)]
struct Args {
    /// Files or directories to read
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Config file to use instead of ./docspy.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON file holding persisted preferences
    #[arg(long, value_name = "FILE")]
    state_file: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print matching sections as JSON instead of opening the reader
    #[arg(long, short = 's', value_name = "QUERY")]
    search: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut cfg = args
        .config
        .as_deref()
        .map_or_else(Config::load, Config::load_from);

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    if cfg.file_extensions.is_empty() {
        cfg.file_extensions = vec![MarkdownFormat.file_extension().to_string()];
    }
    if let Some(state_file) = &args.state_file {
        cfg.state_file = state_file.to_string_lossy().to_string();
    }
    init_logging(args.log_file.as_deref(), args.search.is_some())?;

    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths
    };
    let documents = input::find_documents(paths, &cfg.file_extensions)?;
    if documents.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }

    let format = MarkdownFormat;
    let doc = input::load_page(&documents, &format)?;
    if doc.sections.is_empty() {
        eprintln!("No sections found in documents");
        return Ok(());
    }

    if let Some(query) = args.search {
        return print_search(doc, &query);
    }

    let title = page_title(&doc, &documents[0]);
    let base_dir = documents[0]
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let settings = Settings::new(FileStore::open(&cfg.state_file)?);
    let size = terminal::size()?;
    let page = DocsController::new(
        doc,
        title,
        PageOptions {
            elements: cfg.elements(),
            settings,
            size,
            metrics: cfg.metrics(),
            fallback_image: cfg.fallback_image.clone(),
            image_source: Box::new(FsImageSource::new(base_dir)),
            system_theme: theme::system_preference(),
            delays: Delays {
                scroll_spy_ms: cfg.scroll_spy_delay_ms,
                search_ms: cfg.search_delay_ms,
                resize_ms: cfg.resize_delay_ms,
            },
        },
    );

    run_tui(page, &documents)
}

/// Logs go to `log_file` when given. Without one, only the non-interactive
/// search mode logs, to stderr; the reader owns the terminal.
fn init_logging(log_file: Option<&Path>, to_stderr: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docspy=info"));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if to_stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn page_title(doc: &Document, first: &Path) -> String {
    doc.sections
        .iter()
        .find(|s| s.level == 1)
        .map(|s| s.title.clone())
        .or_else(|| first.file_stem().map(|s| s.to_string_lossy().to_string()))
        .unwrap_or_else(|| "docs".to_string())
}

fn print_search(mut doc: Document, query: &str) -> Result<()> {
    let index = SearchIndex::build(&doc.sections);
    let results = match index.search(query, &mut doc.sections) {
        SearchOutcome::Found { results, .. } => results,
        SearchOutcome::NoResults { .. } | SearchOutcome::Cleared => Vec::new(),
    };
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

fn run_tui(mut page: DocsController, documents: &[PathBuf]) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut page, documents);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "reader stopped");
        eprintln!("Error: {e}");
    }
    result
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

enum Action {
    Input(PageInput),
    Reload,
    Quit,
    Nothing,
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    page: &mut DocsController,
    documents: &[PathBuf],
) -> Result<()> {
    let start = Instant::now();
    let mut dirty = true;
    loop {
        let now = elapsed_ms(start);
        dirty |= page.tick(now);
        if dirty {
            terminal.draw(|f| ui::draw(f, page))?;
            dirty = false;
        }

        let timeout = page
            .next_deadline(now)
            .map_or(IDLE_POLL, |deadline| {
                Duration::from_millis(deadline.saturating_sub(now)).min(IDLE_POLL)
            });
        if !event::poll(timeout)? {
            continue;
        }

        let full = {
            let size = terminal.size()?;
            Rect::new(0, 0, size.width, size.height)
        };
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => map_key(page, key),
            Event::Mouse(mouse) => map_mouse(page, full, mouse),
            Event::Resize(cols, rows) => Action::Input(PageInput::ViewportResized(cols, rows)),
            _ => Action::Nothing,
        };
        let now = elapsed_ms(start);
        match action {
            Action::Quit => return Ok(()),
            Action::Input(input) => dirty |= page.handle(input, now),
            Action::Reload => {
                match input::load_page(documents, &MarkdownFormat) {
                    Ok(doc) => page.reload_document(doc),
                    Err(e) => tracing::error!(error = %e, "reload failed"),
                }
                dirty = true;
            }
            Action::Nothing => {}
        }
    }
}

fn map_key(page: &DocsController, key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }
    if ctrl && key.code == KeyCode::Char('k') {
        return Action::Input(PageInput::FocusSearch);
    }

    if page.search_focused() {
        let mut query = page.query().to_string();
        return match key.code {
            KeyCode::Esc => Action::Input(PageInput::Escape),
            KeyCode::Enter => Action::Input(PageInput::SelectResult(page.result_cursor())),
            KeyCode::Down => Action::Input(PageInput::ResultCursor(1)),
            KeyCode::Up => Action::Input(PageInput::ResultCursor(-1)),
            KeyCode::Backspace => {
                query.pop();
                Action::Input(PageInput::SearchInput(query))
            }
            KeyCode::Char(c) => {
                query.push(c);
                Action::Input(PageInput::SearchInput(query))
            }
            _ => Action::Nothing,
        };
    }

    let input = match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('r') => return Action::Reload,
        KeyCode::Char('/') => PageInput::FocusSearch,
        KeyCode::Char('j') | KeyCode::Down => PageInput::Scroll(1),
        KeyCode::Char('k') | KeyCode::Up => PageInput::Scroll(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => PageInput::ScrollPages(1),
        KeyCode::PageUp => PageInput::ScrollPages(-1),
        KeyCode::Char('g') | KeyCode::Home => PageInput::BackToTop,
        KeyCode::Char('G') | KeyCode::End => PageInput::ScrollToEnd,
        KeyCode::Char('s') => PageInput::ToggleSidebar,
        KeyCode::Char('t') => PageInput::ToggleTheme,
        KeyCode::Char('l') => PageInput::CycleLayout,
        KeyCode::Char('1') => PageInput::SetLayout(Layout::Layout1),
        KeyCode::Char('2') => PageInput::SetLayout(Layout::Layout2),
        KeyCode::Char('3') => PageInput::SetLayout(Layout::Layout3),
        KeyCode::Char('+' | '=') => PageInput::FontIncrease,
        KeyCode::Char('-') => PageInput::FontDecrease,
        KeyCode::Tab => PageInput::NavCursor(1),
        KeyCode::BackTab => PageInput::NavCursor(-1),
        KeyCode::Enter => PageInput::NavActivate,
        KeyCode::Left | KeyCode::Char('h') => PageInput::NavParent,
        KeyCode::Char('o') => match page.sidebar().and_then(|s| s.tree().cursor()) {
            Some(index) => PageInput::ToggleNavItem(index),
            None => return Action::Nothing,
        },
        KeyCode::Char('c') => PageInput::CollapseAll,
        KeyCode::Char('i') => PageInput::ReloadImages,
        KeyCode::Esc => PageInput::Escape,
        _ => return Action::Nothing,
    };
    Action::Input(input)
}

fn map_mouse(page: &DocsController, full: Rect, mouse: MouseEvent) -> Action {
    let x_px = page.viewport().cols_to_px(mouse.column);
    let input = match mouse.kind {
        MouseEventKind::ScrollDown => PageInput::Scroll(ui::wheel_rows()),
        MouseEventKind::ScrollUp => PageInput::Scroll(-ui::wheel_rows()),
        MouseEventKind::Down(MouseButton::Left) => {
            match ui::hit_test(page, full, mouse.column, mouse.row) {
                Some(input) => input,
                None => return Action::Nothing,
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if !page.listeners().is_empty() => {
            PageInput::PointerMove(x_px)
        }
        MouseEventKind::Up(MouseButton::Left) if !page.listeners().is_empty() => {
            PageInput::PointerUp
        }
        _ => return Action::Nothing,
    };
    Action::Input(input)
}
