//! movierec - pick five movies, get recommendations
//!
//! A terminal client for a movie recommendation service. Search the catalog,
//! select exactly five titles and fetch recommendations, interactively or
//! from scripts.
//!
//! # Modules
//!
//! - `models` - Movie records and service request/response bodies
//! - `catalog` - Popularity-ordered catalog and title search
//! - `selection` - Bounded five-movie selection
//! - `api` - Movie service client
//! - `app` - Selection controller state and key handling
//! - `ui` - View model and ratatui rendering
//! - `cli` / `commands` - Scriptable subcommands
//! - `config` / `logging` - Settings and tracing setup

pub mod api;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod models;
pub mod selection;
pub mod ui;

// Re-export commonly used types
pub use api::{ApiError, MovieServiceClient};
pub use app::{App, AppEvent, Effect};
pub use catalog::{Catalog, SUGGESTION_LIMIT};
pub use models::{Movie, MovieId};
pub use selection::{Selection, Toggle, MAX_SELECTION};
