use chrono::NaiveDate;
use tracing::{debug, info};

use crate::data::Dataset;
use crate::models::{CropSummary, ForecastResult, LinearTrend, PriceSeries, Recommendation};
use crate::services::forecast_service::{self, ForecastError, DEFAULT_HORIZON_DAYS};
use crate::utils::Table;

/// Parsed `$market <crop> [days=N] [price=X]` arguments
#[derive(Debug, Clone, PartialEq)]
pub struct MarketQuery {
    pub crop: String,
    pub horizon_days: i64,
    /// Overrides the last known price as the comparison baseline
    pub baseline_price: Option<f64>,
}

/// Everything the market page shows for one crop
#[derive(Debug, Clone)]
pub struct MarketReport {
    pub series: PriceSeries,
    pub trend: LinearTrend,
    pub horizon_days: i64,
    pub target_date: NaiveDate,
    pub predicted_price: f64,
    pub baseline_price: f64,
    /// `None` when the baseline is zero and no percent change exists
    pub forecast: Option<(ForecastResult, Recommendation)>,
}

/// Parse market arguments. Bare words form the crop name; `days=` and
/// `price=` options may appear anywhere.
pub fn parse_market_args(args: &[&str]) -> Result<MarketQuery, String> {
    let mut crop_words = Vec::new();
    let mut horizon_days = DEFAULT_HORIZON_DAYS;
    let mut baseline_price = None;

    for arg in args {
        let lower = arg.to_lowercase();
        if let Some(value) = lower.strip_prefix("days=") {
            let days = value
                .parse::<i64>()
                .map_err(|_| format!("❌ Invalid horizon '{}'. Use a whole number of days (1-30)", value))?;
            horizon_days = forecast_service::validate_horizon(days).map_err(|e| format!("❌ {}", e))?;
        } else if let Some(value) = lower.strip_prefix("price=") {
            let price = value
                .trim_start_matches('₹')
                .parse::<f64>()
                .map_err(|_| format!("❌ Invalid price '{}'", value))?;
            if !price.is_finite() || price < 0.0 {
                return Err("❌ Current price cannot be negative".to_string());
            }
            baseline_price = Some(price);
        } else {
            crop_words.push(*arg);
        }
    }

    if crop_words.is_empty() {
        return Err("❌ Please name a crop. Usage: `$market <crop> [days=N] [price=X]`".to_string());
    }

    Ok(MarketQuery {
        crop: crop_words.join(" "),
        horizon_days,
        baseline_price,
    })
}

/// Fit the crop's history and forecast at the requested horizon
pub fn build_report(dataset: &Dataset, query: &MarketQuery, today: NaiveDate) -> Result<MarketReport, String> {
    let series = dataset.series(&query.crop).map_err(|e| format!("❌ {}", e))?;
    info!("Forecasting {} ({} points, horizon {}d)", series.crop(), series.len(), query.horizon_days);

    let baseline_price = match query.baseline_price.or_else(|| series.last_price()) {
        Some(price) => price,
        None => return Err(format!("❌ No price history for {}", series.crop())),
    };

    let projection = forecast_service::project(&series, query.horizon_days, today)
        .map_err(|e| format!("❌ {}", e))?;

    let forecast = match forecast_service::recommend(&projection, baseline_price) {
        Ok(outcome) => Some(outcome),
        Err(ForecastError::DivideByZero) => {
            debug!("Baseline price is zero for {}, skipping recommendation", series.crop());
            None
        }
        Err(e) => return Err(format!("❌ {}", e)),
    };

    Ok(MarketReport {
        series,
        trend: projection.trend,
        horizon_days: query.horizon_days,
        target_date: projection.target_date,
        predicted_price: projection.predicted_price,
        baseline_price,
        forecast,
    })
}

/// One-line advice matching the recommendation band
pub fn recommendation_text(result: &ForecastResult, recommendation: Recommendation, horizon_days: i64) -> String {
    let change = result.percent_change;
    match recommendation {
        Recommendation::Rise => format!(
            "🚀 **HOLD!** Prices are expected to RISE by {:.1}% in the next {} days.",
            change, horizon_days
        ),
        Recommendation::Fall => format!(
            "📉 **SELL NOW!** Prices are expected to FALL by {:.1}%. Don't wait.",
            change.abs()
        ),
        Recommendation::Neutral => format!(
            "⚖️ **NEUTRAL.** Market is stable ({:.1}% change). You can sell or hold.",
            change
        ),
    }
}

/// Render the crop overview as a code-block table
pub fn format_crop_table(summaries: &[CropSummary]) -> String {
    let mut table = Table::new(vec!["Crop", "Points", "From", "To", "Last ₹/kg"]).numeric();
    for summary in summaries {
        let points = summary.points.to_string();
        let first = summary.first_date.to_string();
        let last = summary.last_date.to_string();
        let price = format!("{:.2}", summary.last_price);
        table.add_row(vec![summary.crop.as_str(), points.as_str(), first.as_str(), last.as_str(), price.as_str()]);
    }
    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        let csv = "Crop,Date,Price\n\
                   Green Chili,2024-01-01,10\n\
                   Green Chili,2024-01-11,20\n\
                   Onion,2024-01-01,0\n\
                   Onion,2024-01-11,0\n\
                   Garlic,2024-01-01,50\n";
        Dataset::from_reader(csv.as_bytes()).unwrap()
    }

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_parse_market_args() {
        let query = parse_market_args(&["Green", "Chili", "days=10", "price=20.5"]).unwrap();
        assert_eq!(query.crop, "Green Chili");
        assert_eq!(query.horizon_days, 10);
        assert_eq!(query.baseline_price, Some(20.5));

        let query = parse_market_args(&["Rice"]).unwrap();
        assert_eq!(query.horizon_days, DEFAULT_HORIZON_DAYS);
        assert_eq!(query.baseline_price, None);
    }

    #[test]
    fn test_parse_market_args_rejects_bad_input() {
        assert!(parse_market_args(&[]).is_err());
        assert!(parse_market_args(&["Rice", "days=0"]).is_err());
        assert!(parse_market_args(&["Rice", "days=31"]).is_err());
        assert!(parse_market_args(&["Rice", "days=soon"]).is_err());
        assert!(parse_market_args(&["Rice", "price=-1"]).is_err());
    }

    #[test]
    fn test_report_defaults_baseline_to_last_price() {
        let query = parse_market_args(&["green", "chili", "days=10"]).unwrap();
        let report = build_report(&dataset(), &query, jan(11)).unwrap();

        assert_eq!(report.series.crop(), "Green Chili");
        assert_eq!(report.baseline_price, 20.0);
        assert!((report.predicted_price - 30.0).abs() < 1e-6);

        let (result, rec) = report.forecast.unwrap();
        assert!((result.percent_change - 50.0).abs() < 1e-6);
        assert_eq!(rec, Recommendation::Rise);
    }

    #[test]
    fn test_zero_baseline_reports_prediction_without_recommendation() {
        let query = parse_market_args(&["Onion"]).unwrap();
        let report = build_report(&dataset(), &query, jan(11)).unwrap();
        assert!(report.forecast.is_none());
        assert_eq!(report.predicted_price, 0.0);
    }

    #[test]
    fn test_single_point_crop_is_insufficient() {
        let query = parse_market_args(&["Garlic"]).unwrap();
        let err = build_report(&dataset(), &query, jan(11)).unwrap_err();
        assert!(err.contains("at least 2 points"));
    }

    #[test]
    fn test_recommendation_text() {
        let result = ForecastResult {
            target_date: jan(20),
            predicted_price: 9.0,
            baseline_price: 10.0,
            percent_change: -10.0,
        };
        let text = recommendation_text(&result, Recommendation::Fall, 7);
        assert!(text.contains("SELL NOW"));
        assert!(text.contains("10.0%"));
    }

    #[test]
    fn test_crop_table() {
        let rendered = format_crop_table(&dataset().summaries());
        assert!(rendered.contains("Green Chili"));
        assert!(rendered.contains("Onion"));
        assert!(rendered.starts_with("```"));
    }
}
