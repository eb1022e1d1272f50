//! CLI Command Handlers
//!
//! Implements all CLI commands on top of the movie service client.
//! Each handler takes CLI args and Output, returns ExitCode.

use std::path::PathBuf;
use tracing::{debug, info};

use crate::api::{ApiError, MovieServiceClient};
use crate::catalog::Catalog;
use crate::cli::{CatalogCmd, ConfigCmd, ConfigReport, ExitCode, Output, RecommendCmd, SearchCmd};
use crate::config::Config;
use crate::models::Movie;

/// Resolved settings shared by all commands
pub struct Context {
    pub config: Config,
    /// Explicit `--config` file, if any
    pub config_path: Option<PathBuf>,
    /// `--url` override, kept so re-resolved settings honour it
    pub url_flag: Option<String>,
    pub service_url: String,
}

impl Context {
    pub fn new(config: Config, config_path: Option<PathBuf>, url_flag: Option<&str>) -> Self {
        let service_url = config.service_url(url_flag);
        Self {
            config,
            config_path,
            url_flag: url_flag.map(str::to_string),
            service_url,
        }
    }

    /// Config file in use: the explicit one or the default location
    pub fn config_file(&self) -> Option<PathBuf> {
        self.config_path.clone().or_else(Config::path)
    }

    pub fn client(&self) -> MovieServiceClient {
        MovieServiceClient::with_timeout(&self.service_url, self.config.request_timeout())
    }
}

/// Map a service error to a printed message and exit code
fn api_failure(output: &Output, what: &str, err: ApiError) -> ExitCode {
    match err {
        ApiError::Rejected { message, .. } => output.error(message, ExitCode::ServiceRejected),
        other => output.error(format!("{} failed: {}", what, other), ExitCode::NetworkError),
    }
}

async fn load_catalog(ctx: &Context, output: &Output) -> Result<Catalog, ExitCode> {
    output.info(format!("Loading catalog from {}", ctx.service_url));
    match ctx.client().fetch_catalog().await {
        Ok(movies) => Ok(Catalog::new(movies)),
        Err(e) => Err(api_failure(output, "Catalog load", e)),
    }
}

fn print_movies(output: &Output, movies: &[Movie]) -> ExitCode {
    if let Err(e) = output.print_movies(movies) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Catalog Command
// =============================================================================

pub async fn catalog_cmd(cmd: CatalogCmd, ctx: &Context, output: &Output) -> ExitCode {
    let catalog = match load_catalog(ctx, output).await {
        Ok(catalog) => catalog,
        Err(code) => return code,
    };

    let top: Vec<Movie> = catalog.movies().iter().take(cmd.limit).cloned().collect();
    debug!(total = catalog.len(), shown = top.len(), "catalog listed");
    print_movies(output, &top)
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, ctx: &Context, output: &Output) -> ExitCode {
    let catalog = match load_catalog(ctx, output).await {
        Ok(catalog) => catalog,
        Err(code) => return code,
    };

    let results: Vec<Movie> = catalog
        .search(&cmd.query, cmd.effective_limit())
        .into_iter()
        .cloned()
        .collect();

    if results.is_empty() {
        return output.error(format!("No matches for \"{}\"", cmd.query), ExitCode::NoResults);
    }

    print_movies(output, &results)
}

// =============================================================================
// Recommend Command
// =============================================================================

pub async fn recommend_cmd(cmd: RecommendCmd, ctx: &Context, output: &Output) -> ExitCode {
    let ids = match cmd.movie_ids() {
        Ok(ids) => ids,
        Err(msg) => return output.error(msg, ExitCode::InvalidArgs),
    };

    output.info(format!("Requesting recommendations from {}", ctx.service_url));
    match ctx.client().recommend(&ids).await {
        Ok(movies) if movies.is_empty() => {
            output.error("No recommendations returned", ExitCode::NoResults)
        }
        Ok(movies) => print_movies(output, &movies),
        Err(e) => api_failure(output, "Recommendation request", e),
    }
}

// =============================================================================
// Config Command
// =============================================================================

/// Effective settings for `config`, resolved the way other commands resolve them
pub fn config_report(config: &Config, ctx: &Context) -> ConfigReport {
    ConfigReport {
        service_url: config.service_url(ctx.url_flag.as_deref()),
        request_timeout_secs: config.request_timeout_secs,
        config_path: ctx.config_file().map(|p| p.display().to_string()),
    }
}

pub fn config_cmd(cmd: ConfigCmd, ctx: &Context, output: &Output) -> ExitCode {
    let mut config = ctx.config.clone();

    if cmd.set_url.is_some() || cmd.set_timeout.is_some() {
        if let Some(url) = cmd.set_url {
            config.service_url = Some(url.trim().trim_end_matches('/').to_string());
        }
        if let Some(secs) = cmd.set_timeout {
            config.request_timeout_secs = (secs > 0).then_some(secs);
        }

        let saved = match &ctx.config_path {
            Some(path) => config.save_to(path).map(|_| path.clone()),
            None => config.save(),
        };
        match saved {
            Ok(path) => {
                info!(path = %path.display(), "config saved");
                output.info(format!("Saved {}", path.display()));
            }
            Err(e) => return output.error(format!("Failed to save config: {}", e), ExitCode::Error),
        }
    }

    if let Err(e) = output.print(config_report(&config, ctx)) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}
