//! Error types for plan generation

use thiserror::Error;

/// Result type for plan generation
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a plan
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Too many plan requests in the current window
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Response could not be understood
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error from the core crate (config, secrets)
    #[error(transparent)]
    Core(#[from] koreplan_core::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Parse(format!("Invalid URL: {}", err))
    }
}
