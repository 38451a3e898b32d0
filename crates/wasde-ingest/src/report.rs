//! Report file discovery and filename conventions.
//!
//! Downloaded report files are named `{YYYY-MM-DD}_{original_filename}` by
//! the fetch collaborator; the date prefix is the report date used to key
//! every table the parser produces.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use wasde_model::{Result, WasdeError};

/// Extracts the report date from a downloaded file's name.
pub fn report_date_from_path(path: &Path) -> Result<NaiveDate> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let prefix = name.split('_').next().unwrap_or_default();
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .map_err(|_| WasdeError::ReportDate(name.to_string()))
}

/// Lists downloadable report files in a folder, oldest report first.
///
/// Only `.xls`/`.xlsx` files whose names carry a valid date prefix are
/// returned; anything else in the folder is ignored.
pub fn discover_report_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_spreadsheet = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xls") || ext.eq_ignore_ascii_case("xlsx"));
        if !is_spreadsheet {
            continue;
        }
        if report_date_from_path(&path).is_err() {
            tracing::debug!(path = %path.display(), "skipping file without report-date prefix");
            continue;
        }
        files.push(path);
    }
    // Date prefix sorts lexicographically in chronological order.
    files.sort();
    Ok(files)
}
