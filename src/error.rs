//! Error types for the data and analysis layers.
//!
//! Library errors are `thiserror` enums; the binaries wrap them in `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the workforce table. All of them are fatal:
/// a dashboard is never built from a partially loaded file.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}, column '{column}': '{value}' is not a non-negative integer")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("column totals exceed the supported range: {0}")]
    TotalOverflow(String),

    #[error("invalid file layout: {0}")]
    InvalidLayout(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

/// Returned when a summary is requested for a selection that matched no rows.
///
/// Callers are expected to check [`FilteredView::is_empty`](crate::data::filter::FilteredView::is_empty)
/// first and show a "no data" notice instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no data available for the selected filters")]
pub struct EmptyViewError;
