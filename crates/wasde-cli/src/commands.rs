use std::fs::File;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::{info, info_span, warn};

use wasde_aggregate::preprocess_reports;
use wasde_core::{CommodityTables, process_report};
use wasde_ingest::{ReleaseClient, discover_report_files, download_releases};
use wasde_model::{BoundaryStrategy, Commodity, SheetPlan};

use crate::cli::{FetchArgs, ProcessArgs};
use crate::summary::apply_table_style;
use crate::types::{CommoditySummary, FetchResult, ProcessResult};

pub fn run_fetch(args: &FetchArgs) -> Result<FetchResult> {
    let token = args
        .token
        .clone()
        .or_else(|| std::env::var("WASDE_JWT").ok())
        .context("no API token: pass --token or set WASDE_JWT")?;
    let client = ReleaseClient::new(token)?;
    let releases = client
        .list_releases(&args.start_date, &args.end_date)
        .context("list releases")?;
    info!(
        listed = releases.len(),
        start_date = %args.start_date,
        end_date = %args.end_date,
        "release listing fetched"
    );
    let downloaded = download_releases(&releases, &args.folder, args.limit)?;
    Ok(FetchResult {
        listed: releases.len(),
        downloaded,
        folder: args.folder.clone(),
    })
}

pub fn run_process(args: &ProcessArgs) -> Result<ProcessResult> {
    let mut files = discover_report_files(&args.reports_folder)
        .with_context(|| format!("discover reports in {}", args.reports_folder.display()))?;
    if let Some(limit) = args.limit {
        files.truncate(limit);
    }
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.reports_folder.join("output"));
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))?;

    let commodities: Vec<Commodity> = if args.commodity.is_empty() {
        Commodity::ALL.to_vec()
    } else {
        args.commodity.iter().map(|arg| arg.to_commodity()).collect()
    };

    let mut summaries = Vec::new();
    let mut errors = Vec::new();
    let mut skipped_files = 0usize;

    for commodity in commodities {
        let span = info_span!("commodity", code = commodity.code());
        let _guard = span.enter();
        let start = Instant::now();

        let mut longs: Vec<DataFrame> = Vec::new();
        let mut currents: Vec<DataFrame> = Vec::new();
        let mut nexts: Vec<DataFrame> = Vec::new();
        let mut outlooks: Vec<DataFrame> = Vec::new();
        let mut wides: Vec<DataFrame> = Vec::new();
        let mut reports = 0usize;

        for file in &files {
            match process_report(commodity, file) {
                Ok(tables) => {
                    let wide = tables.wide_row()?;
                    let CommodityTables {
                        long,
                        current,
                        next,
                        outlook,
                        ..
                    } = tables;
                    longs.push(long);
                    currents.push(current);
                    nexts.push(next);
                    outlooks.push(outlook);
                    wides.push(wide);
                    reports += 1;
                }
                Err(error) if error.is_recoverable() => {
                    warn!(
                        file = %file.display(),
                        %error,
                        "skipping unreadable report file"
                    );
                    skipped_files += 1;
                }
                Err(error) => {
                    errors.push(format!("{}: {error}", file.display()));
                }
            }
        }

        let (long_rows, wide_columns) =
            write_commodity_tables(commodity, &output_dir, longs, [
                ("current", currents),
                ("next", nexts),
                ("outlook", outlooks),
                ("wide", wides),
            ])?;

        info!(
            reports,
            long_rows,
            duration_ms = start.elapsed().as_millis(),
            "commodity processed"
        );
        summaries.push(CommoditySummary {
            code: commodity.code().to_string(),
            display_name: commodity.display_name().to_string(),
            reports,
            long_rows,
            wide_columns,
        });
    }

    let has_errors = !errors.is_empty();
    Ok(ProcessResult {
        output_dir,
        summaries,
        skipped_files,
        errors,
        has_errors,
    })
}

/// Concatenates per-report frames across the batch and writes the CSV set
/// for one commodity. Returns the long-table row count and the width of the
/// combined wide table.
fn write_commodity_tables(
    commodity: Commodity,
    output_dir: &Path,
    longs: Vec<DataFrame>,
    stages: [(&str, Vec<DataFrame>); 4],
) -> Result<(usize, usize)> {
    let long_rows = match concat_nonempty(longs)? {
        Some(mut long) => {
            let rows = long.height();
            write_csv(&mut long, &output_dir.join(format!("{}.csv", commodity.code())))?;
            rows
        }
        None => 0,
    };

    let mut wide_columns = 0usize;
    for (suffix, frames) in stages {
        let Some(combined) = concat_nonempty(frames)? else {
            continue;
        };
        let mut sorted = preprocess_reports(&combined)?;
        if suffix == "wide" {
            wide_columns = sorted.width();
        }
        write_csv(
            &mut sorted,
            &output_dir.join(format!("{}_{suffix}.csv", commodity.code())),
        )?;
    }
    Ok((long_rows, wide_columns))
}

/// Diagonal concat tolerating vintage drift in column sets; frames with no
/// columns (stages absent from a report) are dropped first.
fn concat_nonempty(frames: Vec<DataFrame>) -> Result<Option<DataFrame>> {
    let frames: Vec<DataFrame> = frames.into_iter().filter(|df| df.width() > 0).collect();
    if frames.is_empty() {
        return Ok(None);
    }
    Ok(Some(polars::functions::concat_df_diagonal(&frames)?))
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(file)
        .finish(df)
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), rows = df.height(), "table written");
    Ok(())
}

pub fn run_commodities() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Commodity", "Code", "Sheets", "Stage boundaries"]);
    apply_table_style(&mut table);
    for commodity in Commodity::ALL {
        let layout = commodity.layout();
        let sheets = match layout.sheets {
            SheetPlan::Single { sheet } => sheet.to_string(),
            SheetPlan::Split { primary, outlook } => format!("{primary} + {outlook}"),
        };
        let strategy = match layout.boundary_strategy {
            BoundaryStrategy::Single => "single",
            BoundaryStrategy::Dual => "dual",
        };
        table.add_row(vec![
            commodity.display_name().to_string(),
            commodity.code().to_string(),
            sheets,
            strategy.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
