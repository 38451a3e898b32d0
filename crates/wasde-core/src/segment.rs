//! Block segmenter: slices a raw grid into year-stage blocks and strips the
//! footnote and blank artifacts the report format embeds in the data range.
//!
//! Every operation returns a new block; a block handed to a later stage is
//! never mutated.

use wasde_ingest::Cell;
use wasde_model::CropStage;

/// A sub-grid bounded to one crop stage, with the header row already lifted
/// out as column labels.
#[derive(Debug, Clone)]
pub struct RawBlock {
    pub stage: CropStage,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawBlock {
    pub fn new(stage: CropStage, headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            stage,
            headers,
            rows,
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Drops rows whose first cell carries the literal `Est.` token. These
    /// are footnote artifact rows the report embeds inside the data range.
    pub fn drop_est_rows(&self) -> RawBlock {
        let rows = self
            .rows
            .iter()
            .filter(|row| {
                !row.first()
                    .and_then(|cell| cell.text())
                    .is_some_and(|text| text.contains("Est."))
            })
            .cloned()
            .collect();
        RawBlock::new(self.stage, self.headers.clone(), rows)
    }

    /// Drops rows with no non-empty cell.
    pub fn drop_empty_rows(&self) -> RawBlock {
        let rows = self
            .rows
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .cloned()
            .collect();
        RawBlock::new(self.stage, self.headers.clone(), rows)
    }

    /// Drops columns whose every value cell is empty. Header text alone does
    /// not keep a column alive.
    pub fn drop_empty_columns(&self) -> RawBlock {
        let keep: Vec<usize> = (0..self.width())
            .filter(|&col| {
                self.rows
                    .iter()
                    .any(|row| row.get(col).is_some_and(|cell| !cell.is_empty()))
            })
            .collect();
        self.select_columns(&keep)
    }

    /// Drops columns whose header label is blank (a side effect of merged
    /// header cells in the source sheet).
    pub fn drop_unnamed_columns(&self) -> RawBlock {
        let keep: Vec<usize> = (0..self.width())
            .filter(|&col| !self.headers[col].trim().is_empty())
            .collect();
        self.select_columns(&keep)
    }

    /// Shifts the first data column down by one row, compensating for a
    /// merged header cell that visually spans two logical rows. The first
    /// row's label becomes empty and the last label falls off.
    pub fn shift_first_column_down(&self) -> RawBlock {
        let mut rows = self.rows.clone();
        let mut carried = Cell::Empty;
        for row in &mut rows {
            if let Some(first) = row.first_mut() {
                std::mem::swap(first, &mut carried);
            }
        }
        RawBlock::new(self.stage, self.headers.clone(), rows)
    }

    /// The standard artifact sweep applied to every freshly sliced block.
    pub fn cleaned(&self) -> RawBlock {
        self.drop_est_rows().drop_empty_rows().drop_empty_columns()
    }

    fn select_columns(&self, keep: &[usize]) -> RawBlock {
        let headers = keep.iter().map(|&col| self.headers[col].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                keep.iter()
                    .map(|&col| row.get(col).cloned().unwrap_or(Cell::Empty))
                    .collect()
            })
            .collect();
        RawBlock::new(self.stage, headers, rows)
    }
}

/// Renders a header row's cells as column labels.
pub fn headers_from_row(row: &[Cell]) -> Vec<String> {
    row.iter().map(Cell::display).collect()
}
