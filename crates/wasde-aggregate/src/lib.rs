//! Aligns daily market quotes with the monthly report cadence: each report
//! row gains the mean quote over the window between the previous report and
//! the day before its own release.

pub mod quotes;
pub mod window;

pub use quotes::{QUOTE_DATE, SOYBEAN_BUSHEL_TO_USD_MT, preprocess_quotes};
pub use window::{aggregate_by_report_window, preprocess_reports};
