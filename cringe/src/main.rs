//! Entry point: flags, logging to a file, a terminal-restoring panic hook,
//! then the app on a tokio runtime.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cringe_records::{APP_NAME, FileStorage, RecordStore};
use crossterm::event::DisableMouseCapture;
use crossterm::execute;
use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod app;
mod counter;
mod gesture;
mod history;
mod pager;
mod ui;

use crate::app::App;
use crate::pager::NavStrategy;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// How pages are switched.
    #[arg(long, value_enum, default_value_t = NavStrategy::Paged)]
    nav: NavStrategy,

    /// Keep records in this directory instead of the XDG data dir.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "cringe=trace". Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.log_level.as_deref()) {
        eprintln!("Failed to initialize tracing: {err}");
        return ExitCode::FAILURE;
    }
    setup_panic_handler();

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(run(cli))
}

async fn run(cli: Cli) -> ExitCode {
    debug!("starting with {cli:?}");
    match start(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("fatal: {err:?}");
            eprintln!("{err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn start(cli: Cli) -> Result<()> {
    let storage = match cli.data_dir {
        Some(dir) => FileStorage::new(dir),
        None => FileStorage::in_default_dir()?,
    };
    debug!("keeping records in {:?}", storage.dir());

    let mut store = RecordStore::new(Box::new(storage));
    store.load().await;

    let mut app = App::new(store, cli.nav);
    app.run().await
}

/// Logs go to a file in the XDG state dir. Stdout belongs to the UI.
fn init_tracing(level: Option<&str>) -> Result<()> {
    let xdg_dir = xdg::BaseDirectories::with_prefix(APP_NAME)
        .context("failed to locate XDG directories")?;
    let log_path = xdg_dir
        .place_state_file(format!("{APP_NAME}.log"))
        .context("failed to place log file")?;
    let log_file = Arc::new(
        std::fs::File::create(&log_path)
            .with_context(|| format!("failed to create log file {log_path:?}"))?,
    );

    let filter = match level {
        Some(level) => EnvFilter::try_new(level).context("bad log filter")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(filter)
        .with_writer(log_file)
        .init();
    Ok(())
}

/// A panic mid-frame would otherwise leave the terminal in raw mode with
/// the report swallowed by the alternate screen.
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        error!("panic: {panic_info}");
        default_hook(panic_info);
    }));
}
