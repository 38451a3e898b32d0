//! Spreadsheet reading via calamine.
//!
//! Each sheet is read in one blocking call into a [`RawGrid`]; there is no
//! partial-sheet streaming. A missing or corrupt sheet surfaces as
//! [`WasdeError::SheetRead`], which batch callers treat as skippable.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use wasde_model::{Result, WasdeError};

use crate::grid::{Cell, RawGrid};

/// Reads one named sheet of a report workbook into a raw grid.
pub fn read_sheet(path: &Path, sheet: &str) -> Result<RawGrid> {
    let mut workbook = open_workbook_auto(path).map_err(|error| WasdeError::SheetRead {
        path: path.to_path_buf(),
        sheet: sheet.to_string(),
        reason: error.to_string(),
    })?;
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|error| WasdeError::SheetRead {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
            reason: error.to_string(),
        })?;
    Ok(grid_from_range(&range))
}

fn grid_from_range(range: &Range<Data>) -> RawGrid {
    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    RawGrid::from_rows(rows)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(text) => {
            if text.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(text.clone())
            }
        }
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Text(value.to_string()),
        Data::DateTime(value) => Cell::Number(value.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Text(text.clone()),
        Data::Error(error) => Cell::Text(format!("#ERR:{error:?}")),
    }
}
