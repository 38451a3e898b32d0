//! Layout locator: finds the header row and the crop-year boundary rows
//! that separate stage blocks inside a commodity page.

use std::sync::LazyLock;

use regex::Regex;

use wasde_ingest::{Cell, RawGrid};

/// First row considered when scanning for the header.
pub const HEADER_SCAN_START: usize = 3;
/// One past the last row considered when scanning for the header.
pub const HEADER_SCAN_END: usize = 15;
/// Row assumed to hold the header when no marker is found in range. This is
/// a known-layout assumption for historical report vintages, not a generic
/// default; hitting it is logged so misparsed vintages stay visible.
pub const HEADER_FALLBACK_ROW: usize = 7;

/// Crop-year token such as `2024/25` or `2024 / 25 Est.`, the marker of a
/// stage boundary row.
static CROP_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d{4}\s*/\s*\d{2}(?:\s*est\.?)?").expect("crop-year pattern")
});

/// Scans `[min_row, max_row)` for the first row containing the
/// "Beginning Stocks" header label (matched case-insensitively on the
/// substring `beginning`). Falls back to [`HEADER_FALLBACK_ROW`].
pub fn find_header_row(grid: &RawGrid, min_row: usize, max_row: usize) -> usize {
    let end = max_row.min(grid.height());
    for index in min_row..end {
        let found = grid.row(index).iter().any(|cell| {
            cell.text()
                .is_some_and(|text| text.to_lowercase().contains("beginning"))
        });
        if found {
            return index;
        }
    }
    tracing::warn!(
        fallback = HEADER_FALLBACK_ROW,
        "header marker not found in scan range, using fallback row"
    );
    HEADER_FALLBACK_ROW
}

fn row_has_crop_year(row: &[Cell]) -> bool {
    row.iter().any(|cell| {
        cell.text()
            .is_some_and(|text| CROP_YEAR.is_match(&collapse_whitespace(text)))
    })
}

/// Non-breaking spaces become plain spaces and internal whitespace runs
/// collapse, so `2024 / 25` and `2024/25` match alike.
fn collapse_whitespace(text: &str) -> String {
    text.replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Finds the single current/next stage boundary among `rows` (the data
/// region below the header).
///
/// Returns the **last** matching row index: earlier crop-year rows are
/// trailing annotation rows inside a block, and only the final one is the
/// actual split. `None` when no row matches.
pub fn find_stage_boundary(rows: &[Vec<Cell>]) -> Option<usize> {
    let mut last = None;
    for (index, row) in rows.iter().enumerate() {
        if row_has_crop_year(row) {
            last = Some(index);
        }
    }
    last
}

/// Finds **every** crop-year boundary row in order. Used for commodities
/// whose single sheet stacks all three stage blocks.
pub fn find_stage_boundaries_all(rows: &[Vec<Cell>]) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row_has_crop_year(row))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_row(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|value| Cell::from(*value)).collect()
    }

    #[test]
    fn header_row_is_found_by_beginning_marker() {
        let mut rows = vec![vec![Cell::Empty]; 12];
        rows[6] = text_row(&["", "Beginning\nStocks", "Production"]);
        let grid = RawGrid::from_rows(rows);
        assert_eq!(
            find_header_row(&grid, HEADER_SCAN_START, HEADER_SCAN_END),
            6
        );
    }

    #[test]
    fn header_scan_falls_back_to_known_row() {
        let grid = RawGrid::from_rows(vec![vec![Cell::from("notes")]; 20]);
        assert_eq!(
            find_header_row(&grid, HEADER_SCAN_START, HEADER_SCAN_END),
            HEADER_FALLBACK_ROW
        );
    }

    #[test]
    fn header_scan_ignores_rows_before_min() {
        let mut rows = vec![vec![Cell::Empty]; 12];
        rows[1] = text_row(&["Beginning Stocks"]);
        rows[9] = text_row(&["Beginning Stocks"]);
        let grid = RawGrid::from_rows(rows);
        assert_eq!(
            find_header_row(&grid, HEADER_SCAN_START, HEADER_SCAN_END),
            9
        );
    }

    #[test]
    fn single_boundary_takes_the_last_match() {
        let mut rows = vec![vec![Cell::Empty]; 30];
        rows[5] = text_row(&["2023/24"]);
        rows[20] = text_row(&["2024/25 Est."]);
        assert_eq!(find_stage_boundary(&rows), Some(20));
    }

    #[test]
    fn boundary_matching_collapses_nbsp_and_runs() {
        let rows = vec![text_row(&["2024\u{a0}/  25   Est."])];
        assert_eq!(find_stage_boundary(&rows), Some(0));
    }

    #[test]
    fn all_boundaries_come_back_in_order() {
        let mut rows = vec![vec![Cell::Empty]; 40];
        rows[12] = text_row(&["2023/24 Est."]);
        rows[27] = text_row(&["2024/25"]);
        assert_eq!(find_stage_boundaries_all(&rows), vec![12, 27]);
    }

    #[test]
    fn numeric_cells_never_match_the_boundary_pattern() {
        let rows = vec![vec![Cell::Number(2024.25)]];
        assert!(find_stage_boundary(&rows).is_none());
        assert!(find_stage_boundaries_all(&rows).is_empty());
    }
}
