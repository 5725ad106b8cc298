//! Error types shared by the loader, the pass pipeline and the renderers

use thiserror::Error;

/// Errors that abort an export run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("structural violation: {0}")]
    StructuralViolation(String),

    #[error("context id '{0}' is used by more than one context")]
    DuplicateContext(String),

    #[error("task refers to unknown context '{0}'")]
    UnknownContext(String),

    #[error("unknown output format '{0}'")]
    UnknownFormat(String),

    #[error("output file name '{0}' must have a suffix")]
    MissingSuffix(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn structural(msg: impl Into<String>) -> Self {
        Error::StructuralViolation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
