//! Result types shared by the command runners and the summary printer.

use std::path::PathBuf;

/// Outcome of the `fetch` command.
pub struct FetchResult {
    pub listed: usize,
    pub downloaded: usize,
    pub folder: PathBuf,
}

/// Per-commodity outcome of the `process` command.
pub struct CommoditySummary {
    pub code: String,
    pub display_name: String,
    pub reports: usize,
    pub long_rows: usize,
    pub wide_columns: usize,
}

/// Outcome of the `process` command.
pub struct ProcessResult {
    pub output_dir: PathBuf,
    pub summaries: Vec<CommoditySummary>,
    pub skipped_files: usize,
    pub errors: Vec<String>,
    pub has_errors: bool,
}
