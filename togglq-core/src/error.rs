//! Error types for togglq-core

use thiserror::Error;

use crate::query::ParseError;

/// Main error type for the togglq-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Query failed to tokenize or parse
    #[error(transparent)]
    Query(#[from] ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Report source failed to deliver a page
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Request queue could not deliver a result
    #[error("queue error: {0}")]
    Queue(String),

    /// A selection names a project, client or tag the workspace does not know
    #[error("unknown {kind}: \"{name}\"")]
    UnknownName { kind: &'static str, name: String },
}

/// Result type alias for togglq-core
pub type Result<T> = std::result::Result<T, Error>;
