//! Data models for FarmEco commands and services
//!
//! This module organizes the result and data transfer structs used across commands.
//! Each model represents the input or output of a service operation.

pub mod price;
pub mod forecast;
pub mod page;
pub mod waste;
pub mod carbon;

// Re-export commonly used types for convenience
pub use price::{PricePoint, PriceSeries, CropSummary};
pub use forecast::{ForecastResult, LinearTrend, Recommendation};
pub use page::DashboardPage;
pub use waste::{WasteType, ReuseSuggestion, Emphasis};
pub use carbon::{CarbonInputs, CarbonEstimate, FarmingMethod};
