//! movierec - pick five movies, get recommendations
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! movierec
//!
//! # CLI mode (for automation)
//! movierec search "alien"
//! movierec recommend 1 2 3 4 5 --json
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use movierec::api::MovieServiceClient;
use movierec::app::{App, AppEvent, Effect};
use movierec::cli::{Cli, Command, ExitCode, Output};
use movierec::commands::{self, Context};
use movierec::config::Config;
use movierec::logging;
use movierec::ui::{self, View};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        logging::init_cli(cli.verbose);
        let exit_code = run_cli(cli).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        let config = load_config(&cli)?;
        let ctx = Context::new(config, cli.config.clone(), cli.url.as_deref());
        run_tui(ctx).await
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Ok(Config::load()),
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => return output.error(format!("{:#}", e), ExitCode::InvalidArgs),
    };
    let ctx = Context::new(config, cli.config.clone(), cli.url.as_deref());

    match cli.command {
        Some(Command::Catalog(cmd)) => commands::catalog_cmd(cmd, &ctx, &output).await,
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, &ctx, &output).await,
        Some(Command::Recommend(cmd)) => commands::recommend_cmd(cmd, &ctx, &output).await,
        Some(Command::Config(cmd)) => commands::config_cmd(cmd, &ctx, &output),
        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(ctx: Context) -> Result<()> {
    if let Some(path) = logging::init_tui() {
        info!(log = %path.display(), service = %ctx.service_url, "starting interactive session");
    }

    let client = ctx.client();
    let (tx, rx) = mpsc::unbounded_channel();

    // Catalog loads once, in the background
    spawn_catalog_load(client.clone(), tx.clone());

    let mut terminal = init_terminal()?;
    let mut app = App::new();

    let result = run_event_loop(&mut terminal, &mut app, &client, &tx, rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

fn spawn_catalog_load(client: MovieServiceClient, tx: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let result = client.fetch_catalog().await;
        let _ = tx.send(AppEvent::CatalogLoaded(result));
    });
}

fn perform(effect: Effect, client: &MovieServiceClient, tx: &UnboundedSender<AppEvent>) {
    match effect {
        Effect::Recommend(ids) => {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = client.recommend(&ids).await;
                let _ = tx.send(AppEvent::RecommendationsLoaded(result));
            });
        }
    }
}

/// Main event loop - handles input, applies finished requests, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    client: &MovieServiceClient,
    tx: &UnboundedSender<AppEvent>,
    mut rx: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        let view = View::build(app);
        terminal.draw(|frame| ui::draw(frame, &view))?;

        // crossterm polling blocks, keep it off the runtime's worker
        let polled = tokio::task::block_in_place(|| -> Result<Option<Event>> {
            if event::poll(TICK_RATE)? {
                Ok(Some(event::read()?))
            } else {
                Ok(None)
            }
        })?;

        if let Some(Event::Key(key)) = polled {
            // Only handle key press events (ignore releases on Windows)
            if key.kind == KeyEventKind::Press {
                if let Some(effect) = app.handle_key(key) {
                    debug!(?effect, "performing effect");
                    perform(effect, client, tx);
                }
            }
        }

        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }
    }

    info!("session ended");
    Ok(())
}
