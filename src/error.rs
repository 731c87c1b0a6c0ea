//! Error types shared across the deck store, session engine and routing.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures while reading or writing persisted state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A study session cannot be built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("deck '{0}' has no cards")]
    EmptyDeck(String),
}

/// A navigation path could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown page '{0}'")]
    UnknownPath(String),

    #[error("unknown mode '{0}'")]
    UnknownMode(String),

    #[error("missing query parameter '{0}'")]
    MissingParam(&'static str),

    #[error("query parameter is not valid UTF-8: {0}")]
    Encoding(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
