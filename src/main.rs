//! biblio-manager binary entry point.
//!
//! Initializes the terminal in raw mode, runs the TUI event loop,
//! and restores the terminal state on exit.

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use biblio_manager::api::ApiClient;
use biblio_manager::app;
use biblio_manager::config::{self, Cli};

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> anyhow::Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    config::init_tracing(&cli.log_file)?;
    tracing::info!(
        api = %cli.api_url,
        "starting biblio-manager v{}",
        env!("CARGO_PKG_VERSION")
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let client = ApiClient::new(&cli.api_url);

    let mut terminal = init_terminal().map_err(|e| anyhow::anyhow!("init terminal: {e}"))?;

    let res = app::run(
        &mut terminal,
        client,
        runtime.handle().clone(),
        &cli.theme_file,
        &cli.keybinds_file,
    );

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        eprintln!("application error: {err}");
    }
    Ok(())
}
