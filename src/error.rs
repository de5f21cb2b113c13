use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn one delimited line into a document.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("expected at least {expected} fields, found {found}")]
    MissingFields { expected: usize, found: usize },
    #[error("field `{field}`: `{value}` is not an integer")]
    InvalidInteger { field: &'static str, value: String },
    #[error("field `{field}`: `{value}` is not a decimal number")]
    InvalidDecimal { field: &'static str, value: String },
    #[error("field `{field}`: `{value}` is not a yyyy-MM-dd date")]
    InvalidDate { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// Missing or unusable run configuration, detected before any I/O.
    #[error("configuration error: {0}")]
    Config(String),
    #[error("unable to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: read failed")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },
    #[error("unexpected server reply: {0}")]
    UnexpectedReply(String),
    #[error("mongodb error: {0}")]
    Storage(#[from] mongodb::error::Error),
}

impl LoadError {
    pub fn is_config(&self) -> bool {
        matches!(self, LoadError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
