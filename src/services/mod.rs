pub mod forecast_service;
pub mod price_service;
pub mod chart_service;
pub mod waste_service;
pub mod carbon_service;
pub mod home_service;
