//! End-to-end pipeline tests over synthetic report grids, covering both
//! sheet plans: the stacked single-sheet oilseed pages and the split
//! grain pages with their outlook-sheet row-shift artifact.

use std::path::Path;

use polars::prelude::AnyValue;

use wasde_core::{any_to_f64, assemble_from_grids, column_string_values};
use wasde_ingest::{Cell, RawGrid};
use wasde_model::{Commodity, WasdeError};

const REPORT_DATE: &str = "2024-05-10";

fn report_path() -> &'static Path {
    Path::new("2024-05-10_wasde0524.xls")
}

fn text_row(values: &[&str]) -> Vec<Cell> {
    values.iter().map(|value| Cell::from(*value)).collect()
}

fn country_row(label: &str, values: &[f64]) -> Vec<Cell> {
    let mut row = vec![Cell::from(label)];
    row.extend(values.iter().map(|&value| Cell::Number(value)));
    row
}

fn label_only(label: &str, width: usize) -> Vec<Cell> {
    let mut row = vec![Cell::from(label)];
    row.resize(width, Cell::Empty);
    row
}

fn value_of(df: &polars::prelude::DataFrame, column: &str) -> Option<f64> {
    let value = df
        .column(column)
        .unwrap_or_else(|_| panic!("missing column {column}"))
        .get(0)
        .unwrap_or(AnyValue::Null);
    any_to_f64(value)
}

/// A stacked single-sheet page: three stage blocks separated by two
/// crop-year rows, with the outlook block's first column shifted up one row
/// the way merged header cells leave it.
fn soybean_grid() -> RawGrid {
    let header = text_row(&[
        "Soybeans",
        "Beginning\nStocks",
        "Production",
        "Imports",
        "Domestic\nCrush",
        "Domestic\nTotal/",
        "Exports",
        "Ending\nStocks",
    ]);
    let mut rows: Vec<Vec<Cell>> = vec![
        text_row(&["World Soybean Supply and Use"]),
        Vec::new(),
        text_row(&["(Million Metric Tons)"]),
        Vec::new(),
    ];
    rows.push(header); // row 4, inside the scan range
    // current year
    rows.push(country_row(
        "United States",
        &[6.7, 121.0, 0.7, 61.0, 63.0, 46.1, 9.4],
    ));
    rows.push(country_row(
        "China",
        &[35.0, 20.4, 109.0, 99.0, 115.9, 0.1, 44.4],
    ));
    rows.push(country_row(
        "World",
        &[101.4, 394.9, 177.8, 331.4, 344.7, 181.8, 134.0],
    ));
    rows.push(label_only("2024/25 Est.", 8));
    // next year
    rows.push(country_row(
        "United States",
        &[9.4, 118.8, 0.8, 62.0, 64.2, 49.0, 12.2],
    ));
    rows.push(country_row(
        "China",
        &[44.4, 20.7, 106.0, 100.0, 117.0, 0.1, 51.5],
    ));
    rows.push(country_row(
        "World",
        &[134.0, 398.5, 176.0, 336.0, 349.9, 183.0, 140.2],
    ));
    rows.push(label_only("2025/26 Proj.", 8));
    // outlook year, labels one row above their values
    rows.push(label_only("United States", 8));
    rows.push(country_row(
        "China",
        &[12.2, 118.0, 0.9, 63.5, 65.8, 48.0, 11.0],
    ));
    rows.push(country_row(
        "World",
        &[51.5, 21.0, 104.0, 101.5, 118.5, 0.1, 54.0],
    ));
    rows.push(country_row(
        "",
        &[140.2, 402.0, 175.0, 341.0, 355.2, 188.0, 145.5],
    ));
    RawGrid::from_rows(rows)
}

fn wheat_primary_grid() -> RawGrid {
    let header = text_row(&[
        "Wheat",
        "Beginning\nStocks",
        "Production",
        "Imports",
        "Domestic\nFeed 2/",
        "Domestic\nTotal 2/",
        "Exports",
        "Ending\nStocks",
    ]);
    let mut rows: Vec<Vec<Cell>> = vec![
        text_row(&["World Wheat Supply and Use"]),
        Vec::new(),
        text_row(&["(Million Metric Tons)"]),
        Vec::new(),
    ];
    rows.push(header);
    // current year, with an embedded annotation row
    rows.push(country_row(
        "United States",
        &[1.8, 49.3, 3.7, 2.5, 30.9, 21.1, 2.3],
    ));
    rows.push(country_row(
        "World",
        &[271.2, 789.0, 196.5, 152.0, 779.6, 199.3, 266.0],
    ));
    rows.push(label_only("2023/24 Est.", 8));
    rows.push(label_only("2024/25 Proj.", 8));
    // next year
    rows.push(country_row(
        "United States",
        &[2.3, 50.5, 3.2, 2.7, 31.0, 22.0, 2.6],
    ));
    rows.push(country_row(
        "World",
        &[266.0, 798.0, 199.0, 155.1, 783.0, 201.0, 269.5],
    ));
    RawGrid::from_rows(rows)
}

fn wheat_outlook_grid() -> RawGrid {
    let header = text_row(&[
        "Wheat",
        "Beginning\nStocks",
        "Production",
        "Imports",
        "Domestic\nFeed 2/",
        "Domestic\nTotal 2/",
        "Exports",
        "Ending\nStocks",
    ]);
    let mut rows: Vec<Vec<Cell>> = vec![
        text_row(&["World Wheat Outlook"]),
        Vec::new(),
        Vec::new(),
    ];
    rows.push(header); // row 3
    rows.push(label_only("United States", 8));
    rows.push(country_row(
        "World",
        &[2.6, 51.0, 3.0, 2.8, 31.5, 22.5, 2.9],
    ));
    rows.push(country_row(
        "",
        &[269.5, 805.0, 201.5, 157.0, 790.0, 203.0, 272.0],
    ));
    RawGrid::from_rows(rows)
}

#[test]
fn stacked_sheet_assembles_all_three_stages() {
    let tables = assemble_from_grids(
        Commodity::Soybean,
        &[soybean_grid()],
        REPORT_DATE,
        report_path(),
    )
    .expect("assemble");

    // three countries per stage, minus the trailing aggregate row
    assert_eq!(tables.long.height(), 8);
    let commodities = column_string_values(&tables.long, "commodity").expect("commodity");
    assert!(commodities.iter().all(|tag| tag == "soybean"));
    let stages = column_string_values(&tables.long, "crop_stage").expect("crop_stage");
    assert_eq!(stages.iter().filter(|s| *s == "current year").count(), 3);
    assert_eq!(stages.iter().filter(|s| *s == "next year").count(), 3);
    assert_eq!(stages.iter().filter(|s| *s == "outlook year").count(), 2);

    let wide = tables.wide_row().expect("wide");
    assert_eq!(wide.height(), 1);
    // report_date plus 7 measures for 3 countries in each of 3 stages
    assert_eq!(wide.width(), 1 + 3 * (7 * 3));
    assert_eq!(
        value_of(&wide, "production_soybean_cy_world"),
        Some(394.9)
    );
    assert_eq!(
        value_of(&wide, "domestic_crush_soybean_ny_china"),
        Some(100.0)
    );
    // the outlook world row survives the trailing-row drop because that
    // drop applies to the long table only
    assert_eq!(
        value_of(&wide, "production_soybean_oy_world"),
        Some(402.0)
    );
    assert_eq!(
        value_of(&wide, "exports_soybean_cy_unitedstates"),
        Some(46.1)
    );

    let dates = column_string_values(&wide, "report_date").expect("report_date");
    assert_eq!(dates, vec![REPORT_DATE]);
}

#[test]
fn split_sheets_assemble_with_outlook_repair() {
    let tables = assemble_from_grids(
        Commodity::Wheat,
        &[wheat_primary_grid(), wheat_outlook_grid()],
        REPORT_DATE,
        report_path(),
    )
    .expect("assemble");

    // the annotation row inside the current block is dropped, so two
    // countries per stage remain, minus the trailing row of the long table
    assert_eq!(tables.long.height(), 5);
    let countries = column_string_values(&tables.long, "country").expect("country");
    assert!(countries.iter().all(|name| !name.contains("Est.")));

    let wide = tables.wide_row().expect("wide");
    assert_eq!(wide.width(), 1 + 3 * (7 * 2));
    assert_eq!(value_of(&wide, "exports_wheat_cy_unitedstates"), Some(21.1));
    assert_eq!(value_of(&wide, "domestic_feed_wheat_ny_world"), Some(155.1));
    // outlook values realigned to their shifted-down labels
    assert_eq!(
        value_of(&wide, "beginning_stocks_wheat_oy_unitedstates"),
        Some(2.6)
    );
    assert_eq!(value_of(&wide, "production_wheat_oy_world"), Some(805.0));

    let date_columns = wide
        .get_column_names()
        .iter()
        .filter(|name| name.as_str() == "report_date")
        .count();
    assert_eq!(date_columns, 1);
}

#[test]
fn missing_second_boundary_is_a_layout_error() {
    let mut grid = soybean_grid();
    // truncate right after the first boundary row
    grid.rows.truncate(9);
    let result = assemble_from_grids(
        Commodity::Soybean,
        &[grid],
        REPORT_DATE,
        report_path(),
    );
    assert!(matches!(result, Err(WasdeError::Layout { .. })));
}

#[test]
fn wrong_grid_count_is_a_layout_error() {
    let result = assemble_from_grids(
        Commodity::Wheat,
        &[wheat_primary_grid()],
        REPORT_DATE,
        report_path(),
    );
    assert!(matches!(result, Err(WasdeError::Layout { .. })));
}
