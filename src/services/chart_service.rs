use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use plotters::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::models::{LinearTrend, PriceSeries};
use crate::services::forecast_service;

static CHART_SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Not enough price data to generate chart (minimum 2 points required, found {0})")]
    NotEnoughData(usize),
    #[error("{0}")]
    Render(String),
    #[error("Failed to read chart file: {0}")]
    Io(#[from] std::io::Error),
}

/// Fitted trend and forecast point drawn over the price history
#[derive(Debug, Clone, Copy)]
pub struct TrendOverlay<'a> {
    pub trend: &'a LinearTrend,
    pub target_date: NaiveDate,
    pub predicted_price: f64,
}

fn at_midnight(date: NaiveDate) -> DateTime<Utc> {
    DateTime::<Utc>::from_naive_utc_and_offset(date.and_time(NaiveTime::MIN), Utc)
}

/// Padded Y axis bounds covering every price shown on the chart.
/// The floor stays at zero unless a shown price is itself negative.
pub fn y_bounds(prices: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (min_price, max_price) = prices
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p), hi.max(p)));

    let price_range = (max_price - min_price).max(1e-8);
    let padding = price_range * 0.1;
    let y_min = if min_price < 0.0 {
        min_price - padding
    } else {
        (min_price - padding).max(0.0)
    };
    (y_min, max_price + padding)
}

/// Render the crop's price history as PNG bytes, optionally with the
/// regression line extended to the forecast date.
pub fn render_history_chart(
    series: &PriceSeries,
    overlay: Option<TrendOverlay<'_>>,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ChartError> {
    let points = series.points();
    if points.len() < 2 {
        return Err(ChartError::NotEnoughData(points.len()));
    }

    let image_data = render_to(&chart_path(series.crop()), series, overlay, width, height)?;
    debug!("Rendered {} chart ({} bytes)", series.crop(), image_data.len());
    Ok(image_data)
}

/// Draw into `temp_file`, read it back, and remove it whether or not drawing succeeded
fn render_to(
    temp_file: &Path,
    series: &PriceSeries,
    overlay: Option<TrendOverlay<'_>>,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ChartError> {
    let rendered = draw_chart(temp_file, series, overlay, width, height)
        .and_then(|()| std::fs::read(temp_file).map_err(ChartError::from));

    // BitMapBackend may have created the file before failing
    let _ = std::fs::remove_file(temp_file);

    rendered
}

/// Unique temp path per render, so concurrent renders never share a file
fn chart_path(crop: &str) -> PathBuf {
    let file_crop: String = crop
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let sequence = CHART_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "farmeco_chart_{}_{}_{}_{}.png",
        file_crop,
        std::process::id(),
        Utc::now().timestamp_millis(),
        sequence
    ))
}

fn draw_chart(
    path: &Path,
    series: &PriceSeries,
    overlay: Option<TrendOverlay<'_>>,
    width: u32,
    height: u32,
) -> Result<(), ChartError> {
    let points = series.points();
    let backend = BitMapBackend::new(path, (width, height));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Render(format!("Failed to fill canvas: {}", e)))?;

    let shown_prices = points
        .iter()
        .map(|p| p.price)
        .chain(overlay.map(|o| o.predicted_price));
    let (y_min, y_max) = y_bounds(shown_prices);

    let x_min = at_midnight(points[0].date);
    let last_date = points[points.len() - 1].date;
    let x_end = overlay.map_or(last_date, |o| o.target_date.max(last_date));
    let x_max = at_midnight(x_end);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} Price History", series.crop()),
            ("sans-serif", 40.0).into_font(),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| ChartError::Render(format!("Failed to build chart: {}", e)))?;

    chart
        .configure_mesh()
        .y_desc("Price (₹/kg)")
        .x_desc("Date")
        .draw()
        .map_err(|e| ChartError::Render(format!("Failed to draw mesh: {}", e)))?;

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|p| (at_midnight(p.date), p.price)),
            &BLUE,
        ))
        .map_err(|e| ChartError::Render(format!("Failed to draw history: {}", e)))?
        .label("Price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(
            points
                .iter()
                .map(|p| Circle::new((at_midnight(p.date), p.price), 3, BLUE.filled())),
        )
        .map_err(|e| ChartError::Render(format!("Failed to draw points: {}", e)))?;

    if let Some(overlay) = overlay {
        let trend_start = points[0].date;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![
                    (
                        at_midnight(trend_start),
                        forecast_service::predict_price(overlay.trend, trend_start),
                    ),
                    (
                        at_midnight(overlay.target_date),
                        forecast_service::predict_price(overlay.trend, overlay.target_date),
                    ),
                ],
                &GREEN,
            )))
            .map_err(|e| ChartError::Render(format!("Failed to draw trend: {}", e)))?
            .label("Trend")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));

        chart
            .draw_series(std::iter::once(Circle::new(
                (at_midnight(overlay.target_date), overlay.predicted_price),
                6,
                RED.filled(),
            )))
            .map_err(|e| ChartError::Render(format!("Failed to draw forecast: {}", e)))?
            .label("Forecast")
            .legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| ChartError::Render(format!("Failed to draw legend: {}", e)))?;
    }

    root.present()
        .map_err(|e| ChartError::Render(format!("Failed to render chart: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricePoint;

    #[test]
    fn test_single_point_is_rejected() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = PriceSeries::new("Rice", vec![PricePoint::new(date, 10.0)]);
        let err = render_history_chart(&series, None, 800, 600).unwrap_err();
        assert!(matches!(err, ChartError::NotEnoughData(1)));
    }

    #[test]
    fn test_chart_paths_are_unique_per_render() {
        let first = chart_path("Green Chili");
        let second = chart_path("Green Chili");
        assert_ne!(first, second);
        let name = first.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("farmeco_chart_Green_Chili_"));
    }

    #[test]
    fn test_failed_render_leaves_no_file() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = PriceSeries::new(
            "Rice",
            vec![PricePoint::new(date, 10.0), PricePoint::new(date.succ_opt().unwrap(), 11.0)],
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("chart.png");

        assert!(render_to(&path, &series, None, 320, 240).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_y_bounds_padding_and_floor() {
        let (lo, hi) = y_bounds(vec![10.0, 20.0]);
        assert!((lo - 9.0).abs() < 1e-9);
        assert!((hi - 21.0).abs() < 1e-9);

        let (lo, _) = y_bounds(vec![0.5, 100.0]);
        assert_eq!(lo, 0.0);

        let (lo, _) = y_bounds(vec![-10.0, 10.0]);
        assert!((lo + 12.0).abs() < 1e-9);
    }
}
