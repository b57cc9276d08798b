//! Error types for course-notes

use thiserror::Error;

/// Result type alias for course-notes operations
pub type Result<T> = std::result::Result<T, NotesError>;

/// Errors raised outside the rendering core
///
/// Segmenting and highlighting never fail. These errors come from
/// loading configuration, the content store, sessions and the CLI.
#[derive(Error, Debug)]
pub enum NotesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid rule set '{language}': {reason}")]
    InvalidRuleSet { language: String, reason: String },

    #[error("Input is {size} bytes, limit is {limit}")]
    InputTooLarge { size: usize, limit: usize },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Session expired")]
    SessionExpired,

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: i64 },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Message(String),
}
