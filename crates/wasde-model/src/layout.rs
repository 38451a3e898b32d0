//! Per-commodity report layout configuration.
//!
//! The five commodity pipelines share one assembler; everything that differs
//! between them (which sheets to read, how many stage boundaries the sheet
//! carries, which verbose headers map to which canonical field, and whether
//! the outlook block needs the merged-header row-shift repair) is expressed
//! here as data.

use crate::commodity::Commodity;
use crate::field::Field;

/// Which sheets of the workbook a commodity's tables live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetPlan {
    /// All three stage blocks are stacked in a single sheet.
    Single { sheet: &'static str },
    /// Current/next blocks live on `primary`; the outlook block has its own
    /// sheet.
    Split {
        primary: &'static str,
        outlook: &'static str,
    },
}

impl SheetPlan {
    /// Sheet names in read order.
    pub fn sheet_names(&self) -> Vec<&'static str> {
        match self {
            SheetPlan::Single { sheet } => vec![sheet],
            SheetPlan::Split { primary, outlook } => vec![primary, outlook],
        }
    }
}

/// How many crop-year boundary rows the stage detector must find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryStrategy {
    /// One boundary splits current/next; the outlook block is elsewhere.
    /// The *last* matching row wins; earlier matches are trailing
    /// annotation rows inside a block, not true boundaries.
    Single,
    /// Two boundaries split current/next and next/outlook in one sheet.
    /// Fewer than two matches is a layout error, not a fallback case.
    Dual,
}

/// Maps verbose source header text (with embedded line breaks and footnote
/// markers) to canonical fields. Two verbose variants may collide onto the
/// same field: report vintages differ in footnote suffixes.
pub type SynonymTable = &'static [(&'static str, Field)];

/// Header synonym table for the grain pages (wheat, corn).
pub const GRAIN_SYNONYMS: SynonymTable = &[
    ("Beginning\nStocks", Field::BeginningStocks),
    ("Production", Field::Production),
    ("Imports", Field::Imports),
    ("Domestic\nFeed", Field::DomesticFeed),
    ("Domestic\nFeed 2/", Field::DomesticFeed),
    ("Domestic\nTotal 2/", Field::DomesticTotal),
    ("Exports", Field::Exports),
    ("Ending\nStocks", Field::EndingStocks),
];

/// Header synonym table for the oilseed pages (soybean and products).
pub const OILSEED_SYNONYMS: SynonymTable = &[
    ("Beginning\nStocks", Field::BeginningStocks),
    ("Production", Field::Production),
    ("Imports", Field::Imports),
    ("Domestic\nCrush", Field::DomesticCrush),
    ("Domestic\nTotal/", Field::DomesticTotal),
    ("Domestic\nFeed 2/", Field::DomesticFeed),
    ("Exports", Field::Exports),
    ("Ending\nStocks", Field::EndingStocks),
];

/// Complete parsing configuration for one commodity.
#[derive(Debug, Clone)]
pub struct CommodityLayout {
    pub commodity: Commodity,
    pub sheets: SheetPlan,
    pub boundary_strategy: BoundaryStrategy,
    pub synonyms: SynonymTable,
    /// The outlook block's first data column is shifted down one row to
    /// undo a merged header cell spanning two logical rows.
    pub row_shift_repair: bool,
}

impl CommodityLayout {
    pub fn for_commodity(commodity: Commodity) -> Self {
        match commodity {
            Commodity::Wheat => Self {
                commodity,
                sheets: SheetPlan::Split {
                    primary: "Page 18",
                    outlook: "Page 19",
                },
                boundary_strategy: BoundaryStrategy::Single,
                synonyms: GRAIN_SYNONYMS,
                row_shift_repair: true,
            },
            Commodity::Corn => Self {
                commodity,
                sheets: SheetPlan::Split {
                    primary: "Page 22",
                    outlook: "Page 23",
                },
                boundary_strategy: BoundaryStrategy::Single,
                synonyms: GRAIN_SYNONYMS,
                row_shift_repair: true,
            },
            Commodity::Soybean => Self {
                commodity,
                sheets: SheetPlan::Single { sheet: "Page 28" },
                boundary_strategy: BoundaryStrategy::Dual,
                synonyms: OILSEED_SYNONYMS,
                row_shift_repair: true,
            },
            Commodity::SoybeanOil => Self {
                commodity,
                sheets: SheetPlan::Single { sheet: "Page 30" },
                boundary_strategy: BoundaryStrategy::Dual,
                synonyms: OILSEED_SYNONYMS,
                row_shift_repair: true,
            },
            Commodity::SoybeanMeal => Self {
                commodity,
                sheets: SheetPlan::Single { sheet: "Page 29" },
                boundary_strategy: BoundaryStrategy::Dual,
                synonyms: OILSEED_SYNONYMS,
                row_shift_repair: true,
            },
        }
    }

    /// Looks up the canonical field for a verbose header, if any.
    pub fn canonical_field(&self, header: &str) -> Option<Field> {
        self.synonyms
            .iter()
            .find(|(verbose, _)| *verbose == header.trim_end())
            .map(|(_, field)| *field)
    }
}
