//! CLI - Command Line Interface for movierec
//!
//! Every interactive action is scriptable. All output is JSON-parseable
//! with `--json` (the default when stdout is not a terminal).
//!
//! # Examples
//!
//! ```bash
//! # Browse and search the catalog
//! movierec catalog --limit 5
//! movierec search "star wars" --json
//!
//! # Ask for recommendations
//! movierec recommend 1 2 3 4 5
//!
//! # Point at another service
//! movierec --url http://recs.local:8080 catalog
//! movierec config --set-url http://recs.local:8080
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::catalog::SUGGESTION_LIMIT;
use crate::models::{Movie, MovieId};
use crate::selection::MAX_SELECTION;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error or unexpected response
    NetworkError = 3,
    /// Service refused the request
    ServiceRejected = 4,
    /// Nothing matched
    NoResults = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// movierec - pick five movies, get recommendations
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "movierec",
    version,
    about = "Pick five movies, get recommendations",
    long_about = "A terminal client for a movie recommendation service: search the \
                  catalog, pick exactly five movies and fetch recommendations.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  movierec                            Launch interactive TUI\n\
                  movierec search \"alien\"             Search the catalog\n\
                  movierec recommend 1 2 3 4 5        Get recommendations\n\
                  movierec catalog --json -l 10       Most popular movies"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Log progress to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Base URL of the movie service (overrides MOVIEREC_URL and config)
    #[arg(long, short = 'u', global = true)]
    pub url: Option<String>,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the catalog, most popular first
    #[command(visible_alias = "ls")]
    Catalog(CatalogCmd),

    /// Search catalog titles
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Get recommendations for exactly five movies
    #[command(visible_alias = "rec")]
    Recommend(RecommendCmd),

    /// Show or update the configuration
    Config(ConfigCmd),
}

/// List catalog movies by popularity
#[derive(Args, Debug)]
pub struct CatalogCmd {
    /// Maximum number of movies
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Search the catalog by title (case-insensitive substring)
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search text
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results (at most 10)
    #[arg(long, short = 'l', default_value = "10")]
    pub limit: usize,
}

impl SearchCmd {
    pub fn effective_limit(&self) -> usize {
        self.limit.min(SUGGESTION_LIMIT)
    }
}

/// Request recommendations for five movie ids
#[derive(Args, Debug)]
pub struct RecommendCmd {
    /// Movie ids (exactly five, as shown by `search` or `catalog`)
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,
}

impl RecommendCmd {
    /// Validate ids: exactly five, all distinct, none blank
    pub fn movie_ids(&self) -> Result<Vec<MovieId>, String> {
        let ids: Vec<MovieId> = self.ids.iter().map(|s| MovieId::new(s.as_str())).collect();

        if ids.iter().any(|id| id.as_str().is_empty()) {
            return Err("Movie ids must not be empty".to_string());
        }

        let unique: HashSet<&MovieId> = ids.iter().collect();
        if unique.len() != ids.len() {
            return Err("Movie ids must be distinct".to_string());
        }

        if ids.len() != MAX_SELECTION {
            return Err(format!("Please select exactly {} movies.", MAX_SELECTION));
        }

        Ok(ids)
    }
}

/// Show or persist settings
#[derive(Args, Debug)]
pub struct ConfigCmd {
    /// Save a new service URL
    #[arg(long)]
    pub set_url: Option<String>,

    /// Save a request timeout in seconds (0 disables)
    #[arg(long)]
    pub set_timeout: Option<u64>,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Effective configuration as reported by `config`
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigReport {
    pub service_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print movies, one `[id] name (year)` line each unless JSON
    pub fn print_movies(&self, movies: &[Movie]) -> anyhow::Result<()> {
        if self.json {
            return self.print(movies);
        }
        for movie in movies {
            println!("{}", movie);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
