//! Report-window aggregation.
//!
//! Each report row after the first owns the quote window that starts on the
//! previous report date and ends the day before its own date, so no quote
//! day is counted twice and quotes published on a report day attribute to
//! the following report.

use chrono::{Duration, NaiveDate};
use polars::prelude::{DataFrame, NamedFrom, Series, SortMultipleOptions};
use tracing::debug;

use wasde_core::{any_to_f64, column_string_values};
use wasde_model::{REPORT_DATE, WasdeError};

use crate::quotes::QUOTE_DATE;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(column: &str, value: &str) -> wasde_model::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| WasdeError::Date {
        column: column.to_string(),
        value: value.to_string(),
    })
}

fn date_column(df: &DataFrame, column: &str) -> wasde_model::Result<Vec<NaiveDate>> {
    let values = column_string_values(df, column).ok_or_else(|| WasdeError::Date {
        column: column.to_string(),
        value: "<missing column>".to_string(),
    })?;
    values
        .iter()
        .map(|value| parse_date(column, value))
        .collect()
}

/// Validates every report date and sorts the frame chronologically.
/// Report dates are ISO strings, so a lexicographic sort is a date sort.
pub fn preprocess_reports(df: &DataFrame) -> wasde_model::Result<DataFrame> {
    date_column(df, REPORT_DATE)?;
    Ok(df.sort([REPORT_DATE], SortMultipleOptions::default())?)
}

/// Joins windowed quote means onto the report frame.
///
/// For each report row after the first, every named quote column is averaged
/// over quote days in `[previous report date, report date - 1 day]`; windows
/// with no quotes produce nulls rather than dropping the row. The output
/// keeps the report columns and appends one mean column per quote column
/// plus the `window_start` and `window_end` bounds.
pub fn aggregate_by_report_window(
    reports: &DataFrame,
    quotes: &DataFrame,
    quote_columns: &[&str],
) -> wasde_model::Result<DataFrame> {
    let report_dates = date_column(reports, REPORT_DATE)?;
    let quote_dates = date_column(quotes, QUOTE_DATE)?;

    let windows: Vec<(NaiveDate, NaiveDate)> = report_dates
        .windows(2)
        .map(|pair| (pair[0], pair[1] - Duration::days(1)))
        .collect();
    debug!(reports = report_dates.len(), windows = windows.len(), "windowing quotes");

    let height = windows.len();
    let mut out = reports.slice(1, height);

    for column in quote_columns {
        let source = quotes.column(column)?;
        let means: Vec<Option<f64>> = windows
            .iter()
            .map(|&(start, end)| {
                let mut sum = 0.0;
                let mut count = 0usize;
                for (row, date) in quote_dates.iter().enumerate() {
                    if *date < start || *date > end {
                        continue;
                    }
                    if let Some(value) =
                        source.get(row).ok().and_then(any_to_f64)
                    {
                        sum += value;
                        count += 1;
                    }
                }
                (count > 0).then(|| sum / count as f64)
            })
            .collect();
        out = out.hstack(&[Series::new((*column).into(), means).into()])?;
    }

    let starts: Vec<String> = windows
        .iter()
        .map(|(start, _)| start.format(DATE_FORMAT).to_string())
        .collect();
    let ends: Vec<String> = windows
        .iter()
        .map(|(_, end)| end.format(DATE_FORMAT).to_string())
        .collect();
    out = out.hstack(&[
        Series::new("window_start".into(), starts).into(),
        Series::new("window_end".into(), ends).into(),
    ])?;
    Ok(out)
}
