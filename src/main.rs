#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use berichtform::config::Config;
use berichtform::controller::FormController;
use berichtform::logging;
use berichtform::model::{ReportForm, SystemClock};
use berichtform::storage::FileDraftStore;
use berichtform::transport::HttpTransport;
use berichtform::tui::{App, AppError, Dispatcher};

/// Fill in and submit the periodic report.
#[derive(Parser, Debug)]
#[command(name = "berichtform", version)]
struct Cli {
    /// Configuration file (default: ~/.config/berichtform/config.json).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the submission address from the configuration.
    #[arg(long)]
    action: Option<String>,

    /// Log at debug level unless BERICHTFORM_LOG or RUST_LOG say otherwise.
    #[arg(short, long)]
    verbose: bool,
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    logging::init_subscriber(&logging::log_path()?, cli.verbose)?;

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(action) = cli.action {
        config.action = action;
    }

    let store = FileDraftStore::new()?;
    let dispatcher = Dispatcher::new(Arc::new(HttpTransport::new()?))?;
    let controller = FormController::start(
        config.settings(),
        ReportForm::from_layout(&config.layout),
        Box::new(store),
        &SystemClock,
    );
    tracing::info!(open = controller.is_open(), action = %config.action, "form started");

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(controller, dispatcher);
    let result = app.run(&mut terminal);

    let restore_result = restore_terminal();
    match result {
        Err(e) => Err(e),
        Ok(()) => restore_result.map_err(Into::into),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}
