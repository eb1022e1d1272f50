//! Movie service client
//!
//! Talks to the recommendation backend:
//! - `GET /movies` returns the full catalog
//! - `POST /recommend` turns five movie ids into recommendations

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{ErrorBody, Movie, MovieId, RecommendRequest, RecommendResponse};

/// Movie service error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-success status without a usable error body
    #[error("HTTP error! Status: {0}")]
    Status(u16),

    /// Service refused the request and said why
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

impl ApiError {
    /// Message the service itself provided, if any
    pub fn service_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Transport-level failure (no HTTP response at all)
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::RequestFailed(_))
    }
}

/// Client for the catalog + recommendation service
#[derive(Debug, Clone)]
pub struct MovieServiceClient {
    base_url: String,
    client: reqwest::Client,
}

impl MovieServiceClient {
    /// Create a client for the service at `base_url` (no request timeout)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, None)
    }

    /// Create a client with an optional per-request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: builder.build().unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full catalog (unsorted, as served)
    pub async fn fetch_catalog(&self) -> Result<Vec<Movie>, ApiError> {
        let url = format!("{}/movies", self.base_url);
        debug!(%url, "fetching catalog");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let movies: Vec<Movie> = parse_body(response).await?;
        info!(count = movies.len(), "catalog loaded");
        Ok(movies)
    }

    /// Ask for recommendations based on the given movie ids
    ///
    /// Callers are expected to pass exactly five ids; the service enforces it.
    pub async fn recommend(&self, ids: &[MovieId]) -> Result<Vec<Movie>, ApiError> {
        let url = format!("{}/recommend", self.base_url);
        let body = RecommendRequest {
            movies: ids.to_vec(),
        };
        debug!(%url, ?body, "requesting recommendations");

        let response = self.client.post(&url).json(&body).send().await?;

        match response.status() {
            status if status.is_success() => {
                let parsed: RecommendResponse = parse_body(response).await?;
                info!(count = parsed.recommendations.len(), "recommendations received");
                Ok(parsed.recommendations)
            }
            status => Err(rejection(status, response).await),
        }
    }
}

/// Read and decode a JSON body, mapping decode failures to `InvalidResponse`
async fn parse_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| ApiError::InvalidResponse(format!("JSON parse error: {}", e)))
}

/// Turn a non-success response into `Rejected` when it carries `{"error": ...}`
async fn rejection(status: StatusCode, response: reqwest::Response) -> ApiError {
    let code = status.as_u16();
    match response.text().await {
        Ok(body) => match serde_json::from_str::<ErrorBody>(&body) {
            Ok(err) => ApiError::Rejected {
                status: code,
                message: err.error,
            },
            Err(_) => ApiError::Status(code),
        },
        Err(e) => ApiError::RequestFailed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = MovieServiceClient::new("http://127.0.0.1:5000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ApiError::Status(500).to_string(), "HTTP error! Status: 500");
        let rejected = ApiError::Rejected {
            status: 400,
            message: "Please select exactly 5 movies".into(),
        };
        assert_eq!(rejected.to_string(), "Please select exactly 5 movies");
        assert_eq!(rejected.service_message(), Some("Please select exactly 5 movies"));
        assert!(!rejected.is_network());
    }
}
