//! Data structures for movierec
//!
//! Wire types shared by the catalog, the recommendation service and the UI:
//! - **Movie**: catalog record as served by `GET /movies`
//! - **MovieId**: string-compared identifier (the service mixes numbers and strings)
//! - **Recommend**: request/response bodies for `POST /recommend`

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Caption year used when the service has no year for a movie
pub const UNKNOWN_YEAR: &str = "Unknown";

// =============================================================================
// Identifiers
// =============================================================================

/// Movie identifier, always compared as a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MovieId {
    fn from(s: &str) -> Self {
        MovieId::new(s)
    }
}

impl From<u64> for MovieId {
    fn from(n: u64) -> Self {
        MovieId(n.to_string())
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Scalar::deserialize(deserializer)? {
            Scalar::Int(n) => Ok(MovieId(n.to_string())),
            Scalar::Float(f) => Ok(MovieId(format_number(f))),
            Scalar::Text(s) => Ok(MovieId::new(s)),
        }
    }
}

// =============================================================================
// Movie
// =============================================================================

/// Movie record from the catalog or the recommendation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "movieId")]
    pub id: MovieId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_year")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "de_popularity")]
    pub popularity: f64,
    #[serde(default)]
    pub backdrop_url: Option<String>,
}

impl Movie {
    pub fn new(id: impl Into<MovieId>, name: impl Into<String>, year: u16) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            year: Some(year.to_string()),
            popularity: 0.0,
            backdrop_url: None,
        }
    }

    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = sanitize_popularity(popularity);
        self
    }

    pub fn with_backdrop(mut self, url: impl Into<String>) -> Self {
        self.backdrop_url = Some(url.into());
        self
    }

    /// Title, or an empty string when the service sent none
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn year_label(&self) -> &str {
        self.year.as_deref().unwrap_or(UNKNOWN_YEAR)
    }

    /// `"<name> (<year>)"`, used for suggestion rows and card captions
    pub fn caption(&self) -> String {
        format!("{} ({})", self.title(), self.year_label())
    }

    /// Alt text shown in place of a poster image
    pub fn poster_alt(&self) -> String {
        format!("{} Poster", self.title())
    }

    /// Case-insensitive substring match against an already lower-cased needle
    pub fn matches(&self, needle: &str) -> bool {
        self.name
            .as_deref()
            .map(|n| n.to_lowercase().contains(needle))
            .unwrap_or(false)
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.id, self.caption())
    }
}

// =============================================================================
// Recommendation Service Bodies
// =============================================================================

/// Body of `POST /recommend`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub movies: Vec<MovieId>,
}

/// Successful `POST /recommend` response
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendResponse {
    #[serde(default)]
    pub recommendations: Vec<Movie>,
}

/// Error body returned by the service on non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// =============================================================================
// Lenient scalar decoding
// =============================================================================

/// JSON scalar as produced by the catalog service, which fills gaps with "Unknown"
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Render whole floats without a fractional part (`1999.0` -> `1999`)
fn format_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

fn sanitize_popularity(p: f64) -> f64 {
    if p.is_finite() {
        p
    } else {
        0.0
    }
}

fn de_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Int(n)) => Some(n.to_string()),
        Some(Scalar::Float(f)) => Some(format_number(f)),
        Some(Scalar::Text(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

fn de_popularity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Int(n)) => n as f64,
        Some(Scalar::Float(f)) => sanitize_popularity(f),
        Some(Scalar::Text(s)) => s.trim().parse::<f64>().map(sanitize_popularity).unwrap_or(0.0),
        None => 0.0,
    })
}
