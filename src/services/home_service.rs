//! Static content for the dashboard overview page

use chrono::NaiveDate;

use crate::data::Dataset;
use crate::models::{DashboardPage, Recommendation};
use crate::services::forecast_service::{self, DEFAULT_HORIZON_DAYS};

/// A summary card linking to one dashboard module
pub struct OverviewCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub body: &'static str,
    pub action: &'static str,
    pub page: DashboardPage,
}

pub const OVERVIEW_CARDS: [OverviewCard; 3] = [
    OverviewCard {
        icon: "📉",
        title: "Price Alerts",
        body: "Current Rice prices are trending upwards. Check the AI forecast now.",
        action: "Check Forecast",
        page: DashboardPage::MarketAnalytics,
    },
    OverviewCard {
        icon: "🌱",
        title: "Carbon Credits",
        body: "Your practices could yield **₹12,000**. Calculate now.",
        action: "Calculate Earnings",
        page: DashboardPage::CarbonCredit,
    },
    OverviewCard {
        icon: "♻️",
        title: "Waste Reuse",
        body: "Don't burn corn husks! Find profitable eco-friendly solutions.",
        action: "Get Ideas",
        page: DashboardPage::AgroWaste,
    },
];

pub const SEASONAL_ADVICE: &str = "Monsoon is expected to start in 12 days. We recommend reinforcing your storage silos \
and moving your harvested grain to a dry environment immediately.";

/// Monsoon preparation guide as (section, advice) pairs
pub const MONSOON_GUIDE: [(&str, &str); 3] = [
    (
        "1. Storage Safety",
        "• Inspect silos for cracks before rain starts.\n• Use **hermetic bags** (airtight) to prevent moisture.",
    ),
    (
        "2. Field Drainage",
        "• Clear all drainage channels to avoid waterlogging.\n• Create raised beds for vegetables like Tomato and Chili.",
    ),
    (
        "3. Disease Prevention",
        "• High humidity causes fungal growth. Spray **Neem Oil** preemptively.",
    ),
];

/// Live price alert for the crop with the largest expected move over the
/// default horizon, measured against its last known price.
/// `None` when no crop can be forecast.
pub fn price_alert(dataset: &Dataset, today: NaiveDate) -> Option<String> {
    let (crop, result, recommendation) = dataset
        .crops()
        .iter()
        .filter_map(|crop| {
            let series = dataset.series(crop).ok().filter(|s| !s.is_empty())?;
            let baseline = series.last_price()?;
            let (result, recommendation) =
                forecast_service::forecast(&series, baseline, DEFAULT_HORIZON_DAYS, today).ok()?;
            Some((crop.as_str(), result, recommendation))
        })
        .max_by(|a, b| a.1.percent_change.abs().total_cmp(&b.1.percent_change.abs()))?;

    let outlook = match recommendation {
        Recommendation::Rise => "trending upwards",
        Recommendation::Fall => "trending downwards",
        Recommendation::Neutral => "stable",
    };

    Some(format!(
        "Current {} prices are {} ({:+.1}% in {} days). Check the AI forecast now.",
        crop, outlook, result.percent_change, DEFAULT_HORIZON_DAYS
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_price_alert_picks_largest_move() {
        let csv = "Crop,Date,Price\n\
                   Rice,2024-01-01,30\n\
                   Rice,2024-01-11,30.5\n\
                   Onion,2024-01-01,40\n\
                   Onion,2024-01-11,20\n\
                   Garlic,2024-01-01,50\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();

        let alert = price_alert(&dataset, jan(11)).unwrap();
        assert!(alert.starts_with("Current Onion prices are trending downwards"));
        assert!(alert.contains("-70.0%"));
    }

    #[test]
    fn test_price_alert_none_without_forecastable_crops() {
        let csv = "Crop,Date,Price\nGarlic,2024-01-01,50\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(price_alert(&dataset, jan(11)), None);
    }

    #[test]
    fn test_cards_cover_every_module_page() {
        for page in DashboardPage::ALL.iter().filter(|p| **p != DashboardPage::Home) {
            assert!(OVERVIEW_CARDS.iter().any(|card| card.page == *page));
        }
    }
}
