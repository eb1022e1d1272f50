//! API clients for external services
//!
//! - Movie service: catalog listing and recommendations

pub mod service;

pub use service::{ApiError, MovieServiceClient};
