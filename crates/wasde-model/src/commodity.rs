//! Commodity and crop-stage vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WasdeError;
use crate::layout::CommodityLayout;

/// The five commodities the pipeline knows how to parse.
///
/// Each commodity corresponds to one or two fixed pages of a WASDE report
/// workbook; the exact page names and parsing quirks live in
/// [`CommodityLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Commodity {
    Wheat,
    Corn,
    Soybean,
    SoybeanOil,
    SoybeanMeal,
}

impl Commodity {
    pub const ALL: [Commodity; 5] = [
        Commodity::Wheat,
        Commodity::Corn,
        Commodity::Soybean,
        Commodity::SoybeanOil,
        Commodity::SoybeanMeal,
    ];

    /// Stable snake_case code used in column names and output files.
    pub fn code(&self) -> &'static str {
        match self {
            Commodity::Wheat => "wheat",
            Commodity::Corn => "corn",
            Commodity::Soybean => "soybean",
            Commodity::SoybeanOil => "soybean_oil",
            Commodity::SoybeanMeal => "soybean_meal",
        }
    }

    /// Human-readable name for summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            Commodity::Wheat => "Wheat",
            Commodity::Corn => "Corn",
            Commodity::Soybean => "Soybean",
            Commodity::SoybeanOil => "Soybean Oil",
            Commodity::SoybeanMeal => "Soybean Meal",
        }
    }

    /// The layout configuration driving this commodity's parser.
    pub fn layout(&self) -> CommodityLayout {
        CommodityLayout::for_commodity(*self)
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Commodity {
    type Err = WasdeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wheat" => Ok(Commodity::Wheat),
            "corn" => Ok(Commodity::Corn),
            "soybean" => Ok(Commodity::Soybean),
            "soybean_oil" | "soybean-oil" => Ok(Commodity::SoybeanOil),
            "soybean_meal" | "soybean-meal" => Ok(Commodity::SoybeanMeal),
            other => Err(WasdeError::UnknownCommodity(other.to_string())),
        }
    }
}

/// One of the three estimate horizons published side by side in a report page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropStage {
    CurrentYear,
    NextYear,
    OutlookYear,
}

impl CropStage {
    /// Stage order as the blocks appear top to bottom in a sheet.
    pub const ALL: [CropStage; 3] = [
        CropStage::CurrentYear,
        CropStage::NextYear,
        CropStage::OutlookYear,
    ];

    /// Label stored in the long table's `crop_stage` column.
    pub fn label(&self) -> &'static str {
        match self {
            CropStage::CurrentYear => "current year",
            CropStage::NextYear => "next year",
            CropStage::OutlookYear => "outlook year",
        }
    }

    /// Short code embedded in pivoted column names.
    pub fn code(&self) -> &'static str {
        match self {
            CropStage::CurrentYear => "cy",
            CropStage::NextYear => "ny",
            CropStage::OutlookYear => "oy",
        }
    }
}

impl fmt::Display for CropStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commodity_codes_round_trip() {
        for commodity in Commodity::ALL {
            let parsed: Commodity = commodity.code().parse().expect("parse code");
            assert_eq!(parsed, commodity);
        }
    }

    #[test]
    fn unknown_commodity_is_rejected() {
        assert!("rice".parse::<Commodity>().is_err());
    }

    #[test]
    fn stage_codes_are_distinct() {
        let codes: Vec<&str> = CropStage::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(codes, vec!["cy", "ny", "oy"]);
    }

    #[test]
    fn serde_uses_snake_case_tags() {
        let json = serde_json::to_string(&Commodity::SoybeanOil).expect("serialize");
        assert_eq!(json, "\"soybean_oil\"");
        let stage: CropStage = serde_json::from_str("\"outlook_year\"").expect("deserialize");
        assert_eq!(stage, CropStage::OutlookYear);
    }
}
