use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use pdf_qa::config::AppConfig;
use pdf_qa::core::logging;
use pdf_qa::tui::app::AppState;
use pdf_qa::tui::services::Services;
use pdf_qa::tui::views::path_prompt::expand_home;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_notices) = AppConfig::load();

    // Initialize logging (file only; the TUI owns the terminal)
    let _log_guard = logging::init_tui(&logging::log_dir(&config.data_dir()));
    log::info!("{} v{} starting", pdf_qa::NAME, pdf_qa::VERSION);
    for notice in &config_notices {
        notice.emit();
    }

    let initial_pdf: Option<PathBuf> = std::env::args().nth(1).map(|arg| expand_home(&arg));

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::new(&config, event_tx);
    let mut app = AppState::new(event_rx, services, &config.ollama.default_model);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms.max(10));
    let result = app.run(&mut terminal, tick_rate, initial_pdf).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("Fatal: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    log::info!("Shutting down");
    Ok(())
}
