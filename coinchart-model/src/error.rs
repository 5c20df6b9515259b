use std::path::PathBuf;

use coinchart_utils::error::TaError;
use thiserror::Error;

/// Failures while loading observations or deriving metrics from them.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to open {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV input")]
    Csv(#[from] csv::Error),
    #[error("missing required column '{column}'")]
    MissingColumn { column: &'static str },
    #[error("line {line}: missing value for '{column}'")]
    MissingField { column: &'static str, line: u64 },
    #[error("line {line}: cannot parse '{value}' in column '{column}' as a number")]
    Parse {
        column: &'static str,
        line: u64,
        value: String,
    },
    #[error("line {line}: unrecognised timestamp '{value}'")]
    InvalidTimestamp { line: u64, value: String },
    #[error(transparent)]
    InvalidWindow(#[from] TaError),
}
