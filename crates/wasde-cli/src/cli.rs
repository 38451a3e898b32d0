//! CLI argument definitions for the WASDE pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use wasde_model::Commodity;

#[derive(Parser)]
#[command(
    name = "wasde",
    version,
    about = "WASDE report pipeline - fetch, parse, and tabulate USDA supply/demand reports",
    long_about = "Download monthly WASDE report spreadsheets from the USDA library,\n\
                  parse the commodity pages into tidy long tables and wide\n\
                  per-report rows, and write them as CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download report files from the USDA library API.
    Fetch(FetchArgs),

    /// Parse downloaded report files and write commodity tables.
    Process(ProcessArgs),

    /// List the supported commodities and their page layouts.
    Commodities,
}

#[derive(Parser)]
pub struct FetchArgs {
    /// Folder to save downloaded report files into.
    #[arg(value_name = "REPORTS_FOLDER")]
    pub folder: PathBuf,

    /// USDA library API token (falls back to the WASDE_JWT environment
    /// variable).
    #[arg(long = "token", value_name = "JWT")]
    pub token: Option<String>,

    /// Earliest release date to list, YYYY-MM-DD.
    #[arg(long = "start-date", value_name = "DATE", default_value = "2000-01-01")]
    pub start_date: String,

    /// Latest release date to list, YYYY-MM-DD.
    #[arg(long = "end-date", value_name = "DATE", default_value = "2026-01-01")]
    pub end_date: String,

    /// Stop after downloading this many new files.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Folder of downloaded report files named {YYYY-MM-DD}_{name}.xls.
    #[arg(value_name = "REPORTS_FOLDER")]
    pub reports_folder: PathBuf,

    /// Output directory for CSV tables (default: <REPORTS_FOLDER>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Commodity to process (repeatable; default: all).
    #[arg(long = "commodity", value_enum, value_name = "COMMODITY")]
    pub commodity: Vec<CommodityArg>,

    /// Process at most this many report files.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,
}

/// CLI commodity choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum CommodityArg {
    Wheat,
    Corn,
    Soybean,
    SoybeanOil,
    SoybeanMeal,
}

impl CommodityArg {
    pub fn to_commodity(self) -> Commodity {
        match self {
            CommodityArg::Wheat => Commodity::Wheat,
            CommodityArg::Corn => Commodity::Corn,
            CommodityArg::Soybean => Commodity::Soybean,
            CommodityArg::SoybeanOil => Commodity::SoybeanOil,
            CommodityArg::SoybeanMeal => Commodity::SoybeanMeal,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
