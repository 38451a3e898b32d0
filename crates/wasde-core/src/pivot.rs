//! Pivot stage: collapses a per-country stage frame into a single wide row
//! keyed by report date, one column per field and country.

use polars::prelude::{AnyValue, Column, DataFrame, DataType, NamedFrom, Series};

use wasde_model::{COUNTRY, Commodity, CropStage, REPORT_DATE};

use crate::polars_utils::{any_to_f64, any_to_string, column_string_values};

/// Country names in first-seen row order. Order is load-bearing: it fixes
/// the column order of the pivoted row across report files.
pub fn countries_in(df: &DataFrame) -> Vec<String> {
    let Some(values) = column_string_values(df, COUNTRY) else {
        return Vec::new();
    };
    let mut seen = Vec::new();
    for value in values {
        let trimmed = value.trim().to_string();
        if !trimmed.is_empty() && !seen.contains(&trimmed) {
            seen.push(trimmed);
        }
    }
    seen
}

/// The measure columns a pivot spreads per country. Everything except the
/// country key and the report date.
pub fn pivot_columns_of(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.as_str().to_string())
        .filter(|name| name != COUNTRY && name != REPORT_DATE)
        .collect()
}

/// Lowercased country label with interior whitespace removed, usable inside
/// a column name.
pub fn country_slug(name: &str) -> String {
    name.split_whitespace()
        .collect::<String>()
        .to_lowercase()
}

/// Pivots one stage frame into a single-row frame.
///
/// Output columns are `report_date` followed by
/// `{field}_{commodity}_{stage}_{country}` for every measure column and
/// country, in first-seen country order. When a country appears in several
/// rows only the first row contributes. An input with no countries pivots
/// to an empty frame.
pub fn pivot(
    df: &DataFrame,
    commodity: Commodity,
    stage: CropStage,
) -> wasde_model::Result<DataFrame> {
    let countries = countries_in(df);
    if countries.is_empty() {
        return Ok(DataFrame::empty());
    }
    let country_values = column_string_values(df, COUNTRY).unwrap_or_default();
    let measure_names = pivot_columns_of(df);

    let first_row_of = |country: &str| {
        country_values
            .iter()
            .position(|value| value.trim() == country)
    };

    let mut seen: Vec<String> = Vec::new();
    let mut columns: Vec<Column> = Vec::new();

    if let Some(dates) = column_string_values(df, REPORT_DATE) {
        let first = countries
            .first()
            .and_then(|country| first_row_of(country))
            .and_then(|row| dates.get(row).cloned())
            .unwrap_or_default();
        seen.push(REPORT_DATE.to_string());
        columns.push(Series::new(REPORT_DATE.into(), vec![first]).into());
    }

    for country in &countries {
        let Some(row) = first_row_of(country) else {
            continue;
        };
        let slug = country_slug(country);
        for measure in &measure_names {
            let name = format!(
                "{measure}_{}_{}_{slug}",
                commodity.code(),
                stage.code()
            );
            if seen.contains(&name) {
                continue;
            }
            let source = df.column(measure)?;
            let value = source.get(row).unwrap_or(AnyValue::Null);
            let column: Column = if is_numeric(source.dtype()) {
                Series::new(name.as_str().into(), vec![any_to_f64(value)]).into()
            } else {
                Series::new(name.as_str().into(), vec![any_to_string(value)]).into()
            };
            seen.push(name);
            columns.push(column);
        }
    }
    Ok(DataFrame::new(columns)?)
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}
