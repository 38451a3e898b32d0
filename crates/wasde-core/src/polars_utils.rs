//! Polars `AnyValue` helpers shared by the frame and pivot stages.

use polars::prelude::{AnyValue, DataFrame};

/// Converts an `AnyValue` to a display string; nulls become empty.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Float32(v) => format!("{v}"),
        AnyValue::Float64(v) => format!("{v}"),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Converts an `AnyValue` to f64, `None` for nulls and non-numerics.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => s.trim().parse::<f64>().ok(),
        AnyValue::StringOwned(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// All values of a column rendered as strings (nulls empty). Returns `None`
/// when the column is absent.
pub fn column_string_values(df: &DataFrame, name: &str) -> Option<Vec<String>> {
    let column = df.column(name).ok()?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_string(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_conversion() {
        assert_eq!(any_to_f64(AnyValue::Float64(1.5)), Some(1.5));
        assert_eq!(any_to_f64(AnyValue::String(" 2.5 ")), Some(2.5));
        assert_eq!(any_to_f64(AnyValue::String("World")), None);
        assert_eq!(any_to_f64(AnyValue::Null), None);
    }

    #[test]
    fn string_conversion() {
        assert_eq!(any_to_string(AnyValue::Null), "");
        assert_eq!(any_to_string(AnyValue::String("x")), "x");
        assert_eq!(any_to_string(AnyValue::Float64(2.0)), "2");
    }
}
