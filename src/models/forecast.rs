//! Price forecast models

use chrono::NaiveDate;
use std::fmt;

/// Band threshold, in percent, separating RISE/FALL from NEUTRAL
pub const CHANGE_THRESHOLD_PERCENT: f64 = 5.0;

/// Ordinary least squares line of price against date ordinal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    /// Price change per day
    pub slope: f64,
    /// Price at ordinal 0
    pub intercept: f64,
    /// Coefficient of determination of the fit
    pub r_squared: f64,
    pub observations: usize,
}

impl LinearTrend {
    /// Evaluate the line at a day ordinal
    pub fn predict_at(&self, ordinal: f64) -> f64 {
        self.intercept + self.slope * ordinal
    }
}

/// Output of a single forecast request
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    pub target_date: NaiveDate,
    pub predicted_price: f64,
    pub baseline_price: f64,
    pub percent_change: f64,
}

impl ForecastResult {
    /// Absolute price difference against the baseline
    pub fn delta(&self) -> f64 {
        self.predicted_price - self.baseline_price
    }
}

/// Advice derived from the forecast percent change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// Prices expected to rise: hold the harvest
    Rise,
    /// Prices expected to fall: sell now
    Fall,
    Neutral,
}

impl Recommendation {
    /// Classify a percent change into one of three ordered bands
    pub fn classify(percent_change: f64) -> Self {
        if percent_change > CHANGE_THRESHOLD_PERCENT {
            Recommendation::Rise
        } else if percent_change < -CHANGE_THRESHOLD_PERCENT {
            Recommendation::Fall
        } else {
            Recommendation::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Rise => "RISE",
            Recommendation::Fall => "FALL",
            Recommendation::Neutral => "NEUTRAL",
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            Recommendation::Rise => "HOLD",
            Recommendation::Fall => "SELL NOW",
            Recommendation::Neutral => "NEUTRAL",
        }
    }

    /// Embed colour for the recommendation banner
    pub fn color(&self) -> u32 {
        match self {
            Recommendation::Rise => 0x00ff00,
            Recommendation::Fall => 0xff0000,
            Recommendation::Neutral => 0x00b0f4,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
