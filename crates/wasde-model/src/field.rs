//! Canonical field names shared by every commodity table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the country column in normalized tables.
pub const COUNTRY: &str = "country";
/// Name of the report-date column in normalized tables.
pub const REPORT_DATE: &str = "report_date";
/// Name of the crop-stage column in long tables.
pub const CROP_STAGE: &str = "crop_stage";
/// Name of the commodity tag column in long tables.
pub const COMMODITY: &str = "commodity";

/// The fixed semantic measures every commodity report expresses, regardless
/// of the verbose header text a given report vintage uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    BeginningStocks,
    Production,
    Imports,
    DomesticFeed,
    DomesticCrush,
    DomesticTotal,
    Exports,
    EndingStocks,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::BeginningStocks,
        Field::Production,
        Field::Imports,
        Field::DomesticFeed,
        Field::DomesticCrush,
        Field::DomesticTotal,
        Field::Exports,
        Field::EndingStocks,
    ];

    /// Canonical snake_case column name.
    pub fn name(&self) -> &'static str {
        match self {
            Field::BeginningStocks => "beginning_stocks",
            Field::Production => "production",
            Field::Imports => "imports",
            Field::DomesticFeed => "domestic_feed",
            Field::DomesticCrush => "domestic_crush",
            Field::DomesticTotal => "domestic_total",
            Field::Exports => "exports",
            Field::EndingStocks => "ending_stocks",
        }
    }

    /// Returns true if `column` is one of the canonical field names.
    pub fn is_canonical(column: &str) -> bool {
        Field::ALL.iter().any(|field| field.name() == column)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
