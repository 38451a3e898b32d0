//! Ingestion for the WASDE pipeline: spreadsheet reading into raw grids,
//! report-file discovery, and the USDA release download client.
//!
//! Parsing never triggers network access; the fetch module is a separate
//! collaborator whose only job is to put report files on disk with the
//! `{YYYY-MM-DD}_{original_filename}` naming convention the parser expects.

pub mod fetch;
pub mod grid;
pub mod report;
pub mod sheet;

pub use fetch::{Release, ReleaseClient, download_releases, release_date};
pub use grid::{Cell, RawGrid};
pub use report::{discover_report_files, report_date_from_path};
pub use sheet::read_sheet;
