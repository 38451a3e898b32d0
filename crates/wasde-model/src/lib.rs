//! Core data model for the WASDE report pipeline.
//!
//! This crate defines the commodity and crop-stage vocabulary, the canonical
//! field names every report table is normalized to, the per-commodity layout
//! configuration, and the shared error taxonomy.

pub mod commodity;
pub mod error;
pub mod field;
pub mod layout;

pub use commodity::{Commodity, CropStage};
pub use error::{Result, WasdeError};
pub use field::{COMMODITY, COUNTRY, CROP_STAGE, Field, REPORT_DATE};
pub use layout::{BoundaryStrategy, CommodityLayout, SheetPlan, SynonymTable};
