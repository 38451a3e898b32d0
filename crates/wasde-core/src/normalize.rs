//! Column normalizer: maps verbose report headers onto canonical field
//! names and manages the per-stage column suffixes that keep concatenated
//! stages from colliding.

use polars::prelude::{Column, DataFrame};

use wasde_model::{COUNTRY, Commodity, CommodityLayout, CropStage, REPORT_DATE};

use crate::segment::RawBlock;

/// Retitles a block's columns using the commodity's synonym table.
///
/// The first column is always the country dimension, whatever the sheet
/// labels it; remaining headers resolve through the synonym table, and
/// unmatched ones are kept under a cleaned version of their raw text. Report
/// vintages differ in footnote suffixes, so two verbose variants may map to
/// the same canonical name; [`dedupe_columns`] resolves that first-wins.
pub fn canonicalize_headers(block: &RawBlock, layout: &CommodityLayout) -> RawBlock {
    let headers = block
        .headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            if index == 0 {
                COUNTRY.to_string()
            } else if let Some(field) = layout.canonical_field(header) {
                field.name().to_string()
            } else {
                clean_header(header)
            }
        })
        .collect();
    RawBlock::new(block.stage, headers, block.rows.clone())
}

/// Keeps only the first occurrence of each column label.
pub fn dedupe_columns(block: &RawBlock) -> RawBlock {
    let mut seen = Vec::new();
    let mut keep = Vec::new();
    for (index, header) in block.headers.iter().enumerate() {
        if !seen.contains(header) {
            seen.push(header.clone());
            keep.push(index);
        }
    }
    let headers = keep.iter().map(|&i| block.headers[i].clone()).collect();
    let rows = block
        .rows
        .iter()
        .map(|row| {
            keep.iter()
                .map(|&i| row.get(i).cloned().unwrap_or(wasde_ingest::Cell::Empty))
                .collect()
        })
        .collect();
    RawBlock::new(block.stage, headers, rows)
}

fn clean_header(header: &str) -> String {
    header
        .replace('\n', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Renames every column except `report_date` and `country` to
/// `{name}_{commodity}_{stage_code}`, so concatenating stages side by side
/// never collides field names.
pub fn apply_stage_suffix(
    df: &DataFrame,
    commodity: Commodity,
    stage: CropStage,
) -> wasde_model::Result<DataFrame> {
    rename_columns(df, |name| {
        if name == REPORT_DATE || name == COUNTRY {
            name.to_string()
        } else {
            format!("{name}_{}_{}", commodity.code(), stage.code())
        }
    })
}

/// Removes a trailing `_{commodity}_{stage_code}` suffix from each column,
/// recovering the canonical field name for reuse as a pivot target.
///
/// Canonical names themselves contain underscores, so stripping is by exact
/// known suffix rather than splitting on the first underscore.
pub fn strip_stage_suffix(df: &DataFrame) -> wasde_model::Result<DataFrame> {
    rename_columns(df, |name| {
        if name == REPORT_DATE || name == COUNTRY {
            return name.to_string();
        }
        for commodity in Commodity::ALL {
            for stage in CropStage::ALL {
                let suffix = format!("_{}_{}", commodity.code(), stage.code());
                if let Some(stripped) = name.strip_suffix(suffix.as_str()) {
                    return stripped.to_string();
                }
            }
        }
        name.to_string()
    })
}

/// Lowercases and trims column labels, dropping duplicates first-wins.
/// Applied to pivoted frames, whose labels were assembled from country text.
pub fn clean_columns(df: &DataFrame) -> wasde_model::Result<DataFrame> {
    rename_columns(df, |name| name.trim().to_lowercase())
}

fn rename_columns(
    df: &DataFrame,
    rename: impl Fn(&str) -> String,
) -> wasde_model::Result<DataFrame> {
    let mut seen: Vec<String> = Vec::new();
    let mut columns: Vec<Column> = Vec::new();
    for column in df.get_columns() {
        let name = rename(column.name().as_str());
        if seen.contains(&name) {
            continue;
        }
        seen.push(name.clone());
        let mut renamed = column.clone();
        renamed.rename(name.into());
        columns.push(renamed);
    }
    Ok(DataFrame::new(columns)?)
}
