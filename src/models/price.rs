//! Crop price history models

use chrono::NaiveDate;

/// A single observed market price for a crop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        PricePoint { date, price }
    }
}

/// Price history for one crop, ascending by date
#[derive(Debug, Clone)]
pub struct PriceSeries {
    crop: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, sorting the points by date.
    /// Points sharing a date keep their input order.
    pub fn new(crop: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        PriceSeries {
            crop: crop.into(),
            points,
        }
    }

    pub fn crop(&self) -> &str {
        &self.crop
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

    /// Most recent observed price, used as the default baseline
    pub fn last_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Lowest and highest observed price
    pub fn price_range(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let min = self.points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
        let max = self.points.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

/// One row of the crop overview table
#[derive(Debug, Clone)]
pub struct CropSummary {
    pub crop: String,
    pub points: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub last_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_series_sorted_by_date() {
        let series = PriceSeries::new(
            "Rice",
            vec![
                PricePoint::new(day(3), 12.0),
                PricePoint::new(day(1), 10.0),
                PricePoint::new(day(2), 11.0),
            ],
        );

        let dates: Vec<_> = series.points().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
        assert_eq!(series.last_price(), Some(12.0));
        assert_eq!(series.first_date(), Some(day(1)));
    }

    #[test]
    fn test_price_range() {
        let series = PriceSeries::new(
            "Wheat",
            vec![PricePoint::new(day(1), 18.5), PricePoint::new(day(2), 14.0)],
        );
        assert_eq!(series.price_range(), Some((14.0, 18.5)));
        assert_eq!(PriceSeries::new("Empty", vec![]).price_range(), None);
    }
}
