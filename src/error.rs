use std::path::PathBuf;
use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum ShelfError {
    /// The database could not be opened or its schema prepared.
    /// Fatal at startup: the application cannot run without storage.
    #[error("Cannot open catalog database at {path}: {source}")]
    StoreUnavailable {
        path: PathBuf,
        source: rusqlite::Error,
    },

    /// A storage failure after startup, propagated unchanged
    #[error("Database error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Rating text that is neither blank nor a number
    #[error("Invalid rating '{0}': expected a number")]
    InvalidRating(String),

    /// The seed file could not be read or parsed
    #[error("Cannot read seed file {path}: {source}")]
    SeedRead { path: PathBuf, source: csv::Error },

    /// Terminal or filesystem I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
