//! Error types for koreplan

use thiserror::Error;

/// Result type alias for koreplan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for koreplan operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing rendered markup failed
    #[error("Format error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// A pattern could not be compiled
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Rendering error
    #[error("Render error: {0}")]
    Render(String),

    /// The backend reported that no plan could be produced
    #[error("Plan error: {0}")]
    Plan(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
