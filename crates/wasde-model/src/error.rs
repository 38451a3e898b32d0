//! Error taxonomy for the WASDE pipeline.
//!
//! File-level failures carry the offending path so a batch caller can log
//! and skip the file without losing track of what went wrong. An empty
//! result is never used to signal failure.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WasdeError {
    /// The requested sheet is missing or unparsable. Recoverable: the batch
    /// caller logs and skips the file.
    #[error("sheet `{sheet}` could not be read from {path}: {reason}")]
    SheetRead {
        path: PathBuf,
        sheet: String,
        reason: String,
    },

    /// Expected header or stage-boundary markers were not found. Fatal for
    /// the file: continuing would silently misalign all stage blocks.
    #[error("report layout not recognized in {path}: {detail}")]
    Layout { path: PathBuf, detail: String },

    /// The report filename does not carry the `YYYY-MM-DD_` date prefix.
    #[error("report filename `{0}` does not start with a YYYY-MM-DD date")]
    ReportDate(String),

    /// A date column holds a value that does not parse as YYYY-MM-DD.
    #[error("invalid date `{value}` in column `{column}`")]
    Date { column: String, value: String },

    #[error("unknown commodity `{0}`")]
    UnknownCommodity(String),

    #[error("dataframe error: {0}")]
    Frame(#[from] polars::prelude::PolarsError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl WasdeError {
    /// True for failures a batch caller should skip past rather than abort on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, WasdeError::SheetRead { .. })
    }
}

pub type Result<T> = std::result::Result<T, WasdeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_read_is_recoverable_layout_is_not() {
        let sheet = WasdeError::SheetRead {
            path: PathBuf::from("a.xls"),
            sheet: "Page 28".to_string(),
            reason: "missing".to_string(),
        };
        let layout = WasdeError::Layout {
            path: PathBuf::from("a.xls"),
            detail: "no boundary".to_string(),
        };
        assert!(sheet.is_recoverable());
        assert!(!layout.is_recoverable());
    }
}
