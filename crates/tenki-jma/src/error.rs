//! Error types for the forecast pipeline.

use thiserror::Error;

/// Persistence-layer failure. Absence of rows is never an error; queries
/// report it as `Ok(None)` or an empty vec.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to open forecast store: {0}")]
    Open(#[source] rusqlite::Error),

    #[error("forecast store query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// Errors surfaced by directory resolution and forecast ingestion.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// Transport failure or timeout talking to the upstream feed.
    #[error("upstream request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The upstream responded, but without the structure we rely on.
    #[error("unexpected upstream document: {0}")]
    Schema(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl WeatherError {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// User-facing message for the presentation layer.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "Could not reach the forecast service. Check your connection and retry.",
            Self::Schema(_) => "The forecast service sent data in an unexpected format.",
            Self::Store(_) => "Could not read or write the local forecast cache.",
        }
    }

    /// Whether retrying the same call can reasonably succeed.
    ///
    /// Schema mismatches mean the upstream format changed; retrying the same
    /// request would fail the same way.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}
