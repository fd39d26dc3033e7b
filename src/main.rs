use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use homelab_dash::{events, ui, App, Dashboard, Settings, Theme};

#[derive(Parser, Debug)]
#[command(name = "homelab-dash")]
#[command(about = "Terminal dashboard that polls homelab services and renders them as cards")]
struct Args {
    /// Path to a TOML config file (defaults to ./homelab.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Redraw interval in milliseconds
    #[arg(short, long, default_value = "250")]
    tick: u64,

    /// Fetch every query once, export the dashboard to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Validate configuration, print the resolved settings and exit
    #[arg(long)]
    check_config: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Configuration problems are reported before the terminal is touched.
    let settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.check_config {
        return match serde_json::to_string_pretty(&settings) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    match run(args, settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "exiting");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args, settings: Settings) -> Result<()> {
    init_tracing(&settings.log_file)?;

    // Pollers run on the runtime; the TUI keeps the main thread.
    let rt = tokio::runtime::Runtime::new()?;
    let dashboard = Dashboard::new(&settings, rt.handle().clone())?;

    if let Some(export_path) = args.export {
        return export_to_file(&rt, &dashboard, &export_path);
    }

    run_tui(dashboard, Duration::from_millis(args.tick))
}

/// Log to a file; the terminal belongs to the TUI.
fn init_tracing(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Run the TUI until the user quits
fn run_tui(dashboard: Dashboard, tick: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    dashboard.start();
    let mut app = App::new(dashboard, Theme::auto_detect());

    let result = run_app(&mut terminal, &mut app, tick);

    app.dashboard.shutdown();
    info!("dashboard stopped");

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        app.refresh(Utc::now());

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = Paragraph::new(msg)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow));
                let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
                    .intersection(area);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(8),    // Chips and cards
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            app.set_layout(chunks[1], ui::grid::columns_for_area(chunks[1]));

            ui::common::render_header(frame, app, chunks[0]);
            ui::grid::render(frame, app, chunks[1]);
            ui::common::render_status_bar(frame, app, chunks[2]);

            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(tick)? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                // Terminal will redraw on next iteration
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    Ok(())
}

/// Fetch everything once and write the dashboard to a JSON file
fn export_to_file(
    rt: &tokio::runtime::Runtime,
    dashboard: &Dashboard,
    export_path: &Path,
) -> Result<()> {
    rt.block_on(dashboard.fetch_all_once());

    let export = dashboard.export(Utc::now());
    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(export_path, json)
        .with_context(|| format!("failed to write {}", export_path.display()))?;

    println!("Exported dashboard to: {}", export_path.display());
    Ok(())
}
