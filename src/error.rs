//! Library error type.
//!
//! Command handlers at the binary layer use `anyhow`; everything under
//! `src/` returns [`JobdexError`] through the crate-local [`Result`] alias.

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaError;

/// Errors produced by the jobdex library.
#[derive(Debug, Error)]
pub enum JobdexError {
    /// Command schema was built from invalid parts.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Input line could not be resolved against a command schema.
    #[error("parse error: {0}")]
    Parse(String),

    /// A record field failed validation.
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// A command was syntactically fine but cannot be applied.
    #[error("{0}")]
    Execution(String),

    /// Record file exists but could not be decoded.
    #[error("corrupt record file {path}: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, JobdexError>;
