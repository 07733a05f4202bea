//! Linear trend price forecasting
//!
//! Fits price against the date's day ordinal with ordinary least squares and
//! extrapolates the line to a future date. The forecast is a pure function of
//! the series, the baseline and the caller's notion of "today".

use chrono::{Datelike, Duration, NaiveDate};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{ForecastResult, LinearTrend, PriceSeries, Recommendation};

/// Smallest horizon accepted from users
pub const MIN_HORIZON_DAYS: i64 = 1;
/// Largest horizon accepted from users
pub const MAX_HORIZON_DAYS: i64 = 30;
pub const DEFAULT_HORIZON_DAYS: i64 = 7;

#[derive(Debug, Error, PartialEq)]
pub enum ForecastError {
    #[error("Not enough price history to forecast: need at least {required} points, found {actual}")]
    InsufficientData { required: usize, actual: usize },
    #[error("All price observations share one date, so no trend can be fitted")]
    DegenerateInput,
    #[error("Baseline price is zero, recommendation unavailable")]
    DivideByZero,
    #[error("Forecast horizon must be between 1 and 30 days, got {0}")]
    InvalidHorizon(i64),
    #[error("Forecast horizon of {0} days does not land on a representable date")]
    HorizonOutOfRange(i64),
}

/// Proleptic Gregorian day ordinal where 0001-01-01 is day 1
pub fn date_ordinal(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64
}

/// Validate a user-supplied horizon
pub fn validate_horizon(days: i64) -> Result<i64, ForecastError> {
    if (MIN_HORIZON_DAYS..=MAX_HORIZON_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(ForecastError::InvalidHorizon(days))
    }
}

/// Fit an OLS line of price on date ordinal.
///
/// Ordinals are mean-centred before accumulating sums; raw ordinals are around
/// 7.4e5 and squaring them loses precision.
pub fn fit(series: &PriceSeries) -> Result<LinearTrend, ForecastError> {
    let points = series.points();
    if points.len() < 2 {
        return Err(ForecastError::InsufficientData {
            required: 2,
            actual: points.len(),
        });
    }

    let first = points[0].date;
    if points.iter().all(|p| p.date == first) {
        return Err(ForecastError::DegenerateInput);
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| date_ordinal(p.date) as f64).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.price).sum::<f64>() / n;

    let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), p| {
        let dx = date_ordinal(p.date) as f64 - mean_x;
        (sxx + dx * dx, sxy + dx * (p.price - mean_y))
    });

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let ss_tot: f64 = points.iter().map(|p| (p.price - mean_y).powi(2)).sum();
    let ss_res: f64 = points
        .iter()
        .map(|p| {
            let dx = date_ordinal(p.date) as f64 - mean_x;
            (p.price - (mean_y + slope * dx)).powi(2)
        })
        .sum();
    let r_squared = if ss_tot > 1e-12 { 1.0 - ss_res / ss_tot } else { 1.0 };

    debug!(
        "Fitted {} trend on {} points: slope={:.6}/day r2={:.4}",
        series.crop(),
        points.len(),
        slope,
        r_squared
    );

    Ok(LinearTrend {
        slope,
        intercept,
        r_squared,
        observations: points.len(),
    })
}

/// Date the forecast targets: `today` plus `horizon_days`.
/// Negative horizons and dates past chrono's calendar range are rejected.
pub fn target_date(today: NaiveDate, horizon_days: i64) -> Result<NaiveDate, ForecastError> {
    if horizon_days < 0 {
        return Err(ForecastError::HorizonOutOfRange(horizon_days));
    }
    Duration::try_days(horizon_days)
        .and_then(|delta| today.checked_add_signed(delta))
        .ok_or(ForecastError::HorizonOutOfRange(horizon_days))
}

/// Evaluate the trend at a calendar date. Negative values are returned as-is.
pub fn predict_price(trend: &LinearTrend, date: NaiveDate) -> f64 {
    trend.predict_at(date_ordinal(date) as f64)
}

/// Percent change of `predicted` against `baseline`
pub fn percent_change(predicted: f64, baseline: f64) -> Result<f64, ForecastError> {
    if baseline == 0.0 {
        return Err(ForecastError::DivideByZero);
    }
    Ok((predicted - baseline) / baseline * 100.0)
}

/// Fitted trend extrapolated to the target date, before any baseline comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub trend: LinearTrend,
    pub target_date: NaiveDate,
    pub predicted_price: f64,
}

/// Fit the series and evaluate the line `horizon_days` after `today`
pub fn project(
    series: &PriceSeries,
    horizon_days: i64,
    today: NaiveDate,
) -> Result<Projection, ForecastError> {
    let trend = fit(series)?;
    let target_date = target_date(today, horizon_days)?;
    let predicted_price = predict_price(&trend, target_date);

    if predicted_price < 0.0 {
        warn!(
            "Trend extrapolates to a negative price ({:.2}) on {}",
            predicted_price, target_date
        );
    }

    Ok(Projection {
        trend,
        target_date,
        predicted_price,
    })
}

/// Compare a projection against the baseline and classify the change
pub fn recommend(
    projection: &Projection,
    baseline_price: f64,
) -> Result<(ForecastResult, Recommendation), ForecastError> {
    let percent_change = percent_change(projection.predicted_price, baseline_price)?;

    Ok((
        ForecastResult {
            target_date: projection.target_date,
            predicted_price: projection.predicted_price,
            baseline_price,
            percent_change,
        },
        Recommendation::classify(percent_change),
    ))
}

/// Fit, predict and classify in one step.
///
/// `horizon_days` is only checked for being representable here; callers
/// taking user input go through [`validate_horizon`] first.
pub fn forecast(
    series: &PriceSeries,
    baseline_price: f64,
    horizon_days: i64,
    today: NaiveDate,
) -> Result<(ForecastResult, Recommendation), ForecastError> {
    let projection = project(series, horizon_days, today)?;
    recommend(&projection, baseline_price)
}
