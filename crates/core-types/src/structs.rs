use crate::enums::ReturnKind;
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// A chronologically ordered series of closing prices for one symbol.
///
/// The only way to build one is through [`PriceSeries::new`], which enforces
/// strictly increasing dates and finite, strictly positive prices. Once built the
/// series is read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, CoreError> {
        let symbol = symbol.into();

        for (i, point) in points.iter().enumerate() {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(CoreError::InvalidInput(
                    symbol.clone(),
                    format!("price on {} must be positive, got {}", point.date, point.close),
                ));
            }
            if i > 0 && point.date <= points[i - 1].date {
                return Err(CoreError::InvalidInput(
                    symbol.clone(),
                    format!(
                        "dates must be strictly increasing, {} follows {}",
                        point.date,
                        points[i - 1].date
                    ),
                ));
            }
        }

        Ok(Self { symbol, points })
    }

    /// Builds a series from parallel date and close slices.
    pub fn from_parts(
        symbol: impl Into<String>,
        dates: &[NaiveDate],
        closes: &[f64],
    ) -> Result<Self, CoreError> {
        let symbol = symbol.into();
        if dates.len() != closes.len() {
            return Err(CoreError::InvalidInput(
                symbol,
                format!("{} dates but {} prices", dates.len(), closes.len()),
            ));
        }
        let points = dates
            .iter()
            .zip(closes)
            .map(|(&date, &close)| PricePoint::new(date, close))
            .collect();
        Self::new(symbol, points)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

/// Period-over-period returns derived from a [`PriceSeries`].
///
/// `dates[i]` is the date of the later price in the pair that produced `values[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    kind: ReturnKind,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Pairs each return with its date; both vectors must have the same length.
    pub fn new(kind: ReturnKind, dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, CoreError> {
        if dates.len() != values.len() {
            return Err(CoreError::InvalidInput(
                "returns".to_string(),
                format!("{} dates but {} values", dates.len(), values.len()),
            ));
        }
        Ok(Self { kind, dates, values })
    }

    pub fn kind(&self) -> ReturnKind {
        self.kind
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rebuilds the price path that produced these returns, starting at `first_price`.
    ///
    /// The result has `len() + 1` entries, the first being `first_price`.
    pub fn reconstruct_prices(&self, first_price: f64) -> Vec<f64> {
        let mut prices = Vec::with_capacity(self.values.len() + 1);
        prices.push(first_price);
        let mut price = first_price;
        for &r in &self.values {
            price = self.kind.apply(price, r);
            prices.push(price);
        }
        prices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn accepts_ordered_positive_prices() {
        let series = PriceSeries::from_parts("AAPL", &[day(1), day(2), day(4)], &[10.0, 11.0, 9.5])
            .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.symbol(), "AAPL");
        assert_eq!(series.last().unwrap().close, 9.5);
        assert_eq!(series.dates(), vec![day(1), day(2), day(4)]);
    }

    #[rstest]
    #[case::zero_price(&[day(1), day(2)], &[10.0, 0.0])]
    #[case::negative_price(&[day(1), day(2)], &[-1.0, 10.0])]
    #[case::nan_price(&[day(1), day(2)], &[10.0, f64::NAN])]
    #[case::duplicate_date(&[day(1), day(1)], &[10.0, 11.0])]
    #[case::out_of_order(&[day(3), day(2)], &[10.0, 11.0])]
    #[case::length_mismatch(&[day(1)], &[10.0, 11.0])]
    fn rejects_invalid_series(#[case] dates: &[NaiveDate], #[case] closes: &[f64]) {
        let result = PriceSeries::from_parts("X", dates, closes);
        assert!(matches!(result, Err(CoreError::InvalidInput(_, _))));
    }

    #[test]
    fn empty_series_is_valid() {
        let series = PriceSeries::new("X", vec![]).unwrap();
        assert!(series.is_empty());
        assert!(series.first().is_none());
    }

    #[test]
    fn return_series_requires_a_date_per_value() {
        let result = ReturnSeries::new(ReturnKind::Simple, vec![day(2)], vec![0.01, 0.02]);
        assert!(matches!(result, Err(CoreError::InvalidInput(_, _))));

        let series = ReturnSeries::new(ReturnKind::Simple, vec![day(2), day(3)], vec![0.5, -0.5]).unwrap();
        assert_eq!(series.reconstruct_prices(10.0), vec![10.0, 15.0, 7.5]);
    }
}
