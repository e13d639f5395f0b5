// Error types for firstpr.
// Covers GitHub API failures, cache I/O, and URL/input problems.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FirstprError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Not a GitHub pull request or issue URL: {0}")]
    BadItemUrl(String),

    #[error("No thread author found for {0}")]
    MissingContributor(String),

    #[error("Cache directory could not be determined")]
    NoCacheDir,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FirstprError>;
