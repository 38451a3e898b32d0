//! Assembler: drives one commodity through the full pipeline for one report
//! file and collects the long table plus the three pivoted stage rows.

use std::path::Path;

use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::debug;

use wasde_ingest::{RawGrid, read_sheet, report_date_from_path};
use wasde_model::{
    BoundaryStrategy, COMMODITY, CROP_STAGE, Commodity, CommodityLayout, CropStage, REPORT_DATE,
    SheetPlan, WasdeError,
};

use crate::frame::block_to_frame;
use crate::layout::{
    HEADER_SCAN_END, HEADER_SCAN_START, find_header_row, find_stage_boundaries_all,
    find_stage_boundary,
};
use crate::normalize::{
    apply_stage_suffix, canonicalize_headers, clean_columns, dedupe_columns, strip_stage_suffix,
};
use crate::pivot::pivot;
use crate::segment::{RawBlock, headers_from_row};

/// Everything one report file yields for one commodity: the tidy long table
/// and the three single-row pivoted stage frames.
#[derive(Debug, Clone)]
pub struct CommodityTables {
    pub commodity: Commodity,
    pub long: DataFrame,
    pub current: DataFrame,
    pub next: DataFrame,
    pub outlook: DataFrame,
}

impl CommodityTables {
    /// All three stage rows side by side, keyed by the single leading
    /// `report_date` column. Empty stages contribute nothing.
    pub fn wide_row(&self) -> wasde_model::Result<DataFrame> {
        let mut wide = DataFrame::empty();
        for stage_frame in [&self.current, &self.next, &self.outlook] {
            if stage_frame.width() == 0 {
                continue;
            }
            if wide.width() == 0 {
                wide = stage_frame.clone();
            } else {
                let trimmed = match stage_frame.drop(REPORT_DATE) {
                    Ok(dropped) => dropped,
                    Err(_) => stage_frame.clone(),
                };
                wide = wide.hstack(trimmed.get_columns())?;
            }
        }
        Ok(wide)
    }
}

/// Parses one report file for one commodity.
///
/// Reads the sheets the commodity's layout names, takes the report date from
/// the filename prefix, and hands the grids to [`assemble_from_grids`].
pub fn process_report(commodity: Commodity, path: &Path) -> wasde_model::Result<CommodityTables> {
    let layout = commodity.layout();
    let report_date = report_date_from_path(path)?;
    let mut grids = Vec::new();
    for sheet in layout.sheets.sheet_names() {
        grids.push(read_sheet(path, sheet)?);
    }
    debug!(
        commodity = commodity.code(),
        report_date = %report_date,
        sheets = grids.len(),
        "report sheets loaded"
    );
    assemble_from_grids(commodity, &grids, &report_date.to_string(), path)
}

/// Runs locate, segment, normalize, and pivot over already-loaded grids.
///
/// Split out from [`process_report`] so the pipeline can be exercised
/// without a workbook on disk.
pub fn assemble_from_grids(
    commodity: Commodity,
    grids: &[RawGrid],
    report_date: &str,
    path: &Path,
) -> wasde_model::Result<CommodityTables> {
    let layout = commodity.layout();
    let blocks = segment_blocks(&layout, grids, path)?;

    let mut stage_frames = Vec::with_capacity(blocks.len());
    for block in blocks {
        let frame = block_to_frame(
            &dedupe_columns(&canonicalize_headers(&prepare_block(block, &layout), &layout)),
            report_date,
        )?;
        stage_frames.push(frame);
    }

    let long = long_table(commodity, &stage_frames)?;

    let mut pivoted = Vec::with_capacity(stage_frames.len());
    for (frame, stage) in stage_frames.iter().zip(CropStage::ALL) {
        pivoted.push(stage_row(frame, commodity, stage)?);
    }
    let mut pivoted = pivoted.into_iter();
    let (current, next, outlook) = (
        pivoted.next().unwrap_or_default(),
        pivoted.next().unwrap_or_default(),
        pivoted.next().unwrap_or_default(),
    );

    Ok(CommodityTables {
        commodity,
        long,
        current,
        next,
        outlook,
    })
}

/// Slices the loaded grids into the three stage blocks.
fn segment_blocks(
    layout: &CommodityLayout,
    grids: &[RawGrid],
    path: &Path,
) -> wasde_model::Result<Vec<RawBlock>> {
    let expected = layout.sheets.sheet_names().len();
    if grids.len() != expected {
        return Err(WasdeError::Layout {
            path: path.to_path_buf(),
            detail: format!("expected {expected} sheet grids, got {}", grids.len()),
        });
    }

    match (&layout.sheets, layout.boundary_strategy) {
        (SheetPlan::Single { .. }, BoundaryStrategy::Dual) => {
            let grid = &grids[0];
            let header = find_header_row(grid, HEADER_SCAN_START, HEADER_SCAN_END);
            let headers = headers_from_row(grid.row(header));
            let data = &grid.rows[(header + 1).min(grid.height())..];
            let boundaries = find_stage_boundaries_all(data);
            if boundaries.len() < 2 {
                return Err(WasdeError::Layout {
                    path: path.to_path_buf(),
                    detail: format!(
                        "need two crop-year boundaries, found {}",
                        boundaries.len()
                    ),
                });
            }
            let (first, second) = (boundaries[0], boundaries[1]);
            Ok(vec![
                RawBlock::new(
                    CropStage::CurrentYear,
                    headers.clone(),
                    data[..first].to_vec(),
                ),
                RawBlock::new(
                    CropStage::NextYear,
                    headers.clone(),
                    data[first + 1..second].to_vec(),
                ),
                RawBlock::new(CropStage::OutlookYear, headers, data[second + 1..].to_vec()),
            ])
        }
        (SheetPlan::Split { .. }, BoundaryStrategy::Single) => {
            let primary = &grids[0];
            let header = find_header_row(primary, HEADER_SCAN_START, HEADER_SCAN_END);
            let headers = headers_from_row(primary.row(header));
            let data = &primary.rows[(header + 1).min(primary.height())..];
            let boundary = find_stage_boundary(data).ok_or_else(|| WasdeError::Layout {
                path: path.to_path_buf(),
                detail: "no crop-year boundary on the primary sheet".to_string(),
            })?;

            let outlook_grid = &grids[1];
            let outlook_header =
                find_header_row(outlook_grid, HEADER_SCAN_START, HEADER_SCAN_END);
            let outlook_headers = headers_from_row(outlook_grid.row(outlook_header));
            let outlook_data =
                &outlook_grid.rows[(outlook_header + 1).min(outlook_grid.height())..];

            Ok(vec![
                RawBlock::new(
                    CropStage::CurrentYear,
                    headers.clone(),
                    data[..boundary].to_vec(),
                ),
                RawBlock::new(CropStage::NextYear, headers, data[boundary + 1..].to_vec()),
                RawBlock::new(
                    CropStage::OutlookYear,
                    outlook_headers,
                    outlook_data.to_vec(),
                ),
            ])
        }
        (sheets, strategy) => Err(WasdeError::Layout {
            path: path.to_path_buf(),
            detail: format!("inconsistent layout configuration: {sheets:?} with {strategy:?}"),
        }),
    }
}

/// The per-block artifact sweep, including the outlook row-shift repair.
fn prepare_block(block: RawBlock, layout: &CommodityLayout) -> RawBlock {
    let mut block = block.cleaned();
    if block.stage == CropStage::OutlookYear && layout.row_shift_repair {
        block = block.shift_first_column_down().drop_empty_rows();
    }
    block.drop_unnamed_columns()
}

/// Stacks the three stage frames into the long table, tags the commodity,
/// and drops the trailing aggregate artifact row.
fn long_table(
    commodity: Commodity,
    stage_frames: &[DataFrame],
) -> wasde_model::Result<DataFrame> {
    let long = polars::functions::concat_df_diagonal(stage_frames)?;
    let tag: polars::prelude::Column = Series::new(
        COMMODITY.into(),
        vec![commodity.code().to_string(); long.height()],
    )
    .into();
    let long = long.hstack(&[tag])?;
    let height = long.height();
    if height > 0 {
        Ok(long.slice(0, height - 1))
    } else {
        Ok(long)
    }
}

/// One stage frame through suffixing, pivoting, and column cleanup.
fn stage_row(
    frame: &DataFrame,
    commodity: Commodity,
    stage: CropStage,
) -> wasde_model::Result<DataFrame> {
    let frame = frame.drop(CROP_STAGE)?;
    let suffixed = apply_stage_suffix(&frame, commodity, stage)?;
    let canonical = strip_stage_suffix(&suffixed)?;
    let pivoted = pivot(&canonical, commodity, stage)?;
    clean_columns(&pivoted)
}

#[cfg(test)]
mod tests {
    use polars::prelude::Column;

    use super::*;

    fn one_row(names: &[&str]) -> DataFrame {
        let columns: Vec<Column> = names
            .iter()
            .map(|name| Series::new((*name).into(), vec![1.0f64]).into())
            .collect();
        DataFrame::new(columns).expect("frame")
    }

    #[test]
    fn wide_row_skips_empty_stages_and_keeps_one_date() {
        let tables = CommodityTables {
            commodity: Commodity::Wheat,
            long: DataFrame::empty(),
            current: one_row(&["report_date", "production_wheat_cy_world"]),
            next: DataFrame::empty(),
            outlook: one_row(&["report_date", "production_wheat_oy_world"]),
        };
        let wide = tables.wide_row().expect("wide");
        let names: Vec<&str> = wide
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "report_date",
                "production_wheat_cy_world",
                "production_wheat_oy_world"
            ]
        );
    }

    #[test]
    fn long_table_drops_only_the_trailing_row() {
        let country: Column =
            Series::new("country".into(), vec!["United States", "China", "World"]).into();
        let df = DataFrame::new(vec![country]).expect("frame");
        let long = long_table(Commodity::Corn, std::slice::from_ref(&df)).expect("long");
        assert_eq!(long.height(), 2);
        assert!(long.column(COMMODITY).is_ok());
    }
}
