//! Terminal summaries for command results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{FetchResult, ProcessResult};

pub fn print_fetch_summary(result: &FetchResult) {
    println!(
        "Listed {} releases, downloaded {} new files to {}",
        result.listed,
        result.downloaded,
        result.folder.display()
    );
}

pub fn print_process_summary(result: &ProcessResult) {
    println!("Output: {}", result.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Commodity"),
        header_cell("Code"),
        header_cell("Reports"),
        header_cell("Rows"),
        header_cell("Wide columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for summary in &result.summaries {
        table.add_row(vec![
            Cell::new(&summary.display_name),
            Cell::new(&summary.code),
            Cell::new(summary.reports),
            Cell::new(summary.long_rows),
            Cell::new(summary.wide_columns),
        ]);
    }
    println!("{table}");
    if result.skipped_files > 0 {
        println!("Skipped {} unreadable report files", result.skipped_files);
    }
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
