//! Converts a normalized block into a typed polars frame, applying the row
//! finalization filter that removes placeholder and summary-artifact rows.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use wasde_ingest::Cell;
use wasde_model::{COUNTRY, CROP_STAGE, Field, REPORT_DATE};

use crate::segment::RawBlock;

/// Builds a `DataFrame` from a canonicalized block.
///
/// Canonical field columns become `Float64` with nulls for blank or
/// non-numeric cells; the country column and any unmatched columns stay
/// `String`. Rows are kept only when the country label is a real name and,
/// where the block carries them, production and exports both parsed as
/// numbers. The frame gains trailing `report_date` and `crop_stage` columns.
pub fn block_to_frame(block: &RawBlock, report_date: &str) -> wasde_model::Result<DataFrame> {
    let country_col = block.headers.iter().position(|h| h == COUNTRY);
    let production_col = block
        .headers
        .iter()
        .position(|h| h == Field::Production.name());
    let exports_col = block.headers.iter().position(|h| h == Field::Exports.name());

    let kept: Vec<&Vec<Cell>> = block
        .rows
        .iter()
        .filter(|row| {
            let named = country_col.is_none_or(|col| {
                row.get(col)
                    .and_then(|cell| cell.text())
                    .is_some_and(is_country_name)
            });
            let measured = [production_col, exports_col].iter().all(|col| {
                col.is_none_or(|col| row.get(col).is_some_and(|cell| cell.as_f64().is_some()))
            });
            named && measured
        })
        .collect();

    let mut columns: Vec<Column> = Vec::with_capacity(block.width() + 2);
    for (index, header) in block.headers.iter().enumerate() {
        let column: Column = if Field::is_canonical(header) {
            let values: Vec<Option<f64>> = kept
                .iter()
                .map(|row| row.get(index).and_then(Cell::as_f64))
                .collect();
            Series::new(header.as_str().into(), values).into()
        } else {
            let values: Vec<String> = kept
                .iter()
                .map(|row| row.get(index).map(Cell::display).unwrap_or_default())
                .collect();
            Series::new(header.as_str().into(), values).into()
        };
        columns.push(column);
    }

    let height = kept.len();
    columns.push(Series::new(REPORT_DATE.into(), vec![report_date.to_string(); height]).into());
    columns.push(
        Series::new(
            CROP_STAGE.into(),
            vec![block.stage.label().to_string(); height],
        )
        .into(),
    );
    Ok(DataFrame::new(columns)?)
}

/// A country cell qualifies when it holds text that is not a null spelling.
fn is_country_name(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    let lowered = trimmed.to_lowercase();
    lowered != "nan" && lowered != "none"
}

#[cfg(test)]
mod tests {
    use wasde_model::CropStage;

    use super::*;
    use crate::polars_utils::column_string_values;

    fn sample_block() -> RawBlock {
        RawBlock::new(
            CropStage::CurrentYear,
            vec![
                COUNTRY.to_string(),
                "production".to_string(),
                "exports".to_string(),
            ],
            vec![
                vec![
                    Cell::from("United States"),
                    Cell::Number(121.0),
                    Cell::Number(45.0),
                ],
                vec![Cell::from("nan"), Cell::Number(1.0), Cell::Number(1.0)],
                vec![Cell::from("China"), Cell::from("(filler)"), Cell::Number(2.0)],
                vec![Cell::from("Brazil"), Cell::from("169.5"), Cell::Number(98.0)],
            ],
        )
    }

    #[test]
    fn placeholder_and_unmeasured_rows_are_dropped() {
        let df = block_to_frame(&sample_block(), "2024-05-10").expect("frame");
        let countries = column_string_values(&df, COUNTRY).expect("country column");
        // nan row and the China row (filler production) are gone
        assert_eq!(countries, vec!["United States", "Brazil"]);
    }

    #[test]
    fn canonical_columns_are_numeric_and_metadata_is_appended() {
        let df = block_to_frame(&sample_block(), "2024-05-10").expect("frame");
        let production = df.column("production").expect("production");
        assert_eq!(
            crate::polars_utils::any_to_f64(
                production.get(1).unwrap_or(polars::prelude::AnyValue::Null)
            ),
            Some(169.5)
        );
        let dates = column_string_values(&df, REPORT_DATE).expect("report_date");
        assert!(dates.iter().all(|date| date == "2024-05-10"));
        let stages = column_string_values(&df, CROP_STAGE).expect("crop_stage");
        assert!(stages.iter().all(|stage| stage == "current year"));
    }

    #[test]
    fn blocks_without_measure_columns_keep_all_named_rows() {
        let block = RawBlock::new(
            CropStage::NextYear,
            vec![COUNTRY.to_string(), "imports".to_string()],
            vec![
                vec![Cell::from("India"), Cell::Empty],
                vec![Cell::from(""), Cell::Number(4.0)],
            ],
        );
        let df = block_to_frame(&block, "2024-05-10").expect("frame");
        assert_eq!(df.height(), 1);
        let imports = df.column("imports").expect("imports");
        assert!(matches!(
            imports.get(0),
            Ok(polars::prelude::AnyValue::Null)
        ));
    }
}
