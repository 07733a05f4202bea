//! Carbon credit calculator models

use std::fmt;
use std::str::FromStr;

/// Farming practice, which scales soil carbon credits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FarmingMethod {
    /// Chemical free
    #[default]
    Organic,
    Conventional,
}

impl FarmingMethod {
    /// Soil credits earned per acre
    pub fn credits_per_acre(&self) -> f64 {
        match self {
            FarmingMethod::Organic => 1.0,
            FarmingMethod::Conventional => 0.5,
        }
    }
}

impl fmt::Display for FarmingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FarmingMethod::Organic => f.write_str("Organic (Chemical Free)"),
            FarmingMethod::Conventional => f.write_str("Conventional"),
        }
    }
}

impl FromStr for FarmingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "organic" | "o" | "chemical-free" => Ok(FarmingMethod::Organic),
            "conventional" | "c" => Ok(FarmingMethod::Conventional),
            _ => Err(format!("Unknown farming method: '{}'. Use: organic, conventional", s)),
        }
    }
}

/// Calculator inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarbonInputs {
    pub farm_size_acres: f64,
    pub method: FarmingMethod,
    pub trees_planted: u32,
}

impl Default for CarbonInputs {
    fn default() -> Self {
        CarbonInputs {
            farm_size_acres: 5.0,
            method: FarmingMethod::Organic,
            trees_planted: 50,
        }
    }
}

/// Credits and income estimated from the inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarbonEstimate {
    pub soil_credits: f64,
    pub tree_credits: f64,
    pub total_credits: f64,
    /// Rupees per year
    pub annual_income: f64,
}
