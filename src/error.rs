//! Error taxonomy for the health tracker.
//!
//! Validation failures are raised at the offending call and never
//! recovered internally; callers decide whether to abort, skip, or retry.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by entry validation, aggregation, and CSV transfer.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Date is not a real calendar date in `YYYY-MM-DD` form.
    #[error("date must be in YYYY-MM-DD format, got '{input}'")]
    InvalidDate { input: String },

    /// Metric name is empty after trimming.
    #[error("metric name must not be empty, got '{input}'")]
    InvalidMetric { input: String },

    /// Value is non-numeric, non-finite, or negative.
    #[error("value must be a finite non-negative number, got '{input}'")]
    InvalidValue { input: String },

    /// Moving-average window of zero.
    #[error("window must be >= 1, got {window}")]
    InvalidWindow { window: usize },

    /// No entries recorded for the requested metric.
    #[error("no entries recorded for metric '{metric}'")]
    NoData { metric: String },

    /// Imported file does not start with `date,metric,value`.
    #[error("expected header 'date,metric,value', found '{found}'")]
    MalformedHeader { found: String },

    /// A row of an imported file failed validation.
    #[error("invalid record at line {line} of {}: {source}", path.display())]
    InvalidRecord {
        path: PathBuf,
        line: u64,
        #[source]
        source: Box<TrackerError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV framing error; I/O failures surface as [`TrackerError::Io`].
    #[error("CSV error: {0}")]
    Csv(csv::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TrackerError>;

impl From<csv::Error> for TrackerError {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return TrackerError::Csv(err);
        }
        match err.into_kind() {
            csv::ErrorKind::Io(io) => TrackerError::Io(io),
            other => TrackerError::Io(std::io::Error::other(format!("{other:?}"))),
        }
    }
}

impl TrackerError {
    /// Whether this error came from input validation rather than I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TrackerError::InvalidDate { .. }
                | TrackerError::InvalidMetric { .. }
                | TrackerError::InvalidValue { .. }
                | TrackerError::InvalidWindow { .. }
        )
    }
}
