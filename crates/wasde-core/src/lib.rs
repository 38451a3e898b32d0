//! Report-parsing core: reconstructs tidy commodity tables from the
//! human-oriented WASDE spreadsheet pages.
//!
//! The pipeline for one commodity and one report file is
//! Load → Locate → Segment → Normalize → Pivot → Assemble; every stage
//! constructs a new structure from the previous one's output, so runs over
//! different report files share no mutable state.

pub mod assembler;
pub mod frame;
pub mod layout;
pub mod normalize;
pub mod pivot;
pub mod polars_utils;
pub mod segment;

pub use assembler::{CommodityTables, assemble_from_grids, process_report};
pub use frame::block_to_frame;
pub use layout::{
    HEADER_FALLBACK_ROW, HEADER_SCAN_END, HEADER_SCAN_START, find_header_row, find_stage_boundary,
    find_stage_boundaries_all,
};
pub use normalize::{
    apply_stage_suffix, canonicalize_headers, clean_columns, dedupe_columns, strip_stage_suffix,
};
pub use pivot::{countries_in, country_slug, pivot, pivot_columns_of};
pub use polars_utils::{any_to_f64, any_to_string, column_string_values};
pub use segment::RawBlock;
