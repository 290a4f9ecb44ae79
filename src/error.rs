use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::Method;

/// Invalid input to one of the statistics routines
///
/// These are never transient: the same input always fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("the sample is empty")]
    EmptySample,
    #[error("the {method} method needs at least {required} data points, got {actual}")]
    TooFewPoints {
        method: Method,
        required: usize,
        actual: usize,
    },
    #[error("the sample contains a NaN or infinite value at index {index}")]
    NonFinite { index: usize },
    #[error("the cut-off factor must be a finite, non-negative number, got {0}")]
    InvalidCutOff(f64),
    #[error("the {method} bounds with k = {cut_off} do not fit in a floating point number")]
    BoundsOverflow { method: Method, cut_off: f64 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Failed to access file {path:?}: {inner}")]
    AccessError {
        path: PathBuf,
        #[source]
        inner: io::Error,
    },
    #[error("Failed to read CSV data from {path:?}: {inner}")]
    CsvError {
        path: PathBuf,
        #[source]
        inner: csv::Error,
    },
    #[error("Column {0:?} not found in the CSV header")]
    MissingColumn(String),
    #[error("Invalid number {value:?} on line {line}")]
    ParseError { line: u64, value: String },
    #[error("Failed to serialize the report: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("Failed to draw plot {path:?}: {message}")]
    PlotError { path: PathBuf, message: String },
}

pub type Result<T> = ::std::result::Result<T, Error>;

/// Logs the error together with its chain of causes.
pub(crate) fn log_error(e: &Error) {
    tracing::error!("error: {}", e);

    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        tracing::error!("  caused by: {}", cause);
        source = cause.source();
    }
}
