//! Quote preprocessing: derives the composite soybean price from its CME
//! quote and cash premium legs.

use polars::prelude::{DataFrame, NamedFrom, Series};

use wasde_core::any_to_f64;

/// Name of the date column in quote frames.
pub const QUOTE_DATE: &str = "date";

/// Bushels of soybeans per metric ton. Quotes arrive in cents per bushel;
/// dividing by 100 and multiplying by this factor yields USD per metric ton.
pub const SOYBEAN_BUSHEL_TO_USD_MT: f64 = 36.7454;

const QUOTE_LEG: &str = "soybean_quote";
const PREMIUM_LEG: &str = "soybean_premium";

/// Replaces the `soybean_quote` and `soybean_premium` legs with a single
/// `soybean` column in USD per metric ton. Rows where either leg is missing
/// yield a null composite.
pub fn preprocess_quotes(df: &DataFrame) -> wasde_model::Result<DataFrame> {
    let quote = df.column(QUOTE_LEG)?;
    let premium = df.column(PREMIUM_LEG)?;
    let composite: Vec<Option<f64>> = (0..df.height())
        .map(|row| {
            let quote = quote.get(row).ok().and_then(any_to_f64)?;
            let premium = premium.get(row).ok().and_then(any_to_f64)?;
            Some((quote + premium) / 100.0 * SOYBEAN_BUSHEL_TO_USD_MT)
        })
        .collect();
    let df = df.drop(QUOTE_LEG)?.drop(PREMIUM_LEG)?;
    Ok(df.hstack(&[Series::new("soybean".into(), composite).into()])?)
}

#[cfg(test)]
mod tests {
    use polars::prelude::{AnyValue, Column};

    use super::*;

    #[test]
    fn composite_price_is_usd_per_metric_ton() {
        let date: Column = Series::new(QUOTE_DATE.into(), vec!["2024-04-12"]).into();
        let quote: Column = Series::new(QUOTE_LEG.into(), vec![Some(1000.0)]).into();
        let premium: Column = Series::new(PREMIUM_LEG.into(), vec![Some(100.0)]).into();
        let df = DataFrame::new(vec![date, quote, premium]).expect("frame");

        let out = preprocess_quotes(&df).expect("preprocess");
        assert!(out.column(QUOTE_LEG).is_err());
        assert!(out.column(PREMIUM_LEG).is_err());
        let value = out
            .column("soybean")
            .expect("soybean")
            .get(0)
            .unwrap_or(AnyValue::Null);
        let value = any_to_f64(value).expect("composite value");
        assert!((value - 11.0 * SOYBEAN_BUSHEL_TO_USD_MT).abs() < 1e-9);
    }

    #[test]
    fn missing_leg_yields_null_composite() {
        let date: Column = Series::new(QUOTE_DATE.into(), vec!["2024-04-12"]).into();
        let quote: Column = Series::new(QUOTE_LEG.into(), vec![None::<f64>]).into();
        let premium: Column = Series::new(PREMIUM_LEG.into(), vec![Some(100.0)]).into();
        let df = DataFrame::new(vec![date, quote, premium]).expect("frame");

        let out = preprocess_quotes(&df).expect("preprocess");
        let value = out
            .column("soybean")
            .expect("soybean")
            .get(0)
            .unwrap_or(AnyValue::Float64(0.0));
        assert_eq!(any_to_f64(value), None);
    }
}
