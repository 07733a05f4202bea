use thiserror::Error;

use crate::models::{CarbonEstimate, CarbonInputs, FarmingMethod};

pub const MIN_FARM_SIZE_ACRES: f64 = 1.0;
pub const MAX_FARM_SIZE_ACRES: f64 = 100.0;
pub const MAX_TREES: u32 = 5000;

/// Trees needed for one credit
const TREES_PER_CREDIT: f64 = 100.0;
/// Rupees earned per credit per year
const INCOME_PER_CREDIT: f64 = 1000.0;

#[derive(Debug, Error, PartialEq)]
pub enum CarbonError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

fn validate(inputs: &CarbonInputs) -> Result<(), CarbonError> {
    let acres = inputs.farm_size_acres;
    if !(MIN_FARM_SIZE_ACRES..=MAX_FARM_SIZE_ACRES).contains(&acres) {
        return Err(CarbonError::OutOfRange {
            field: "Farm size (acres)",
            value: acres,
            min: MIN_FARM_SIZE_ACRES,
            max: MAX_FARM_SIZE_ACRES,
        });
    }
    if inputs.trees_planted > MAX_TREES {
        return Err(CarbonError::OutOfRange {
            field: "Trees planted",
            value: inputs.trees_planted as f64,
            min: 0.0,
            max: MAX_TREES as f64,
        });
    }
    Ok(())
}

/// Estimate credits and annual income from farm size, method and trees
pub fn estimate(inputs: &CarbonInputs) -> Result<CarbonEstimate, CarbonError> {
    validate(inputs)?;

    let soil_credits = inputs.farm_size_acres * inputs.method.credits_per_acre();
    let tree_credits = inputs.trees_planted as f64 / TREES_PER_CREDIT;
    let total_credits = soil_credits + tree_credits;

    Ok(CarbonEstimate {
        soil_credits,
        tree_credits,
        total_credits,
        annual_income: total_credits * INCOME_PER_CREDIT,
    })
}

/// Parse `$carbon [acres] [organic|conventional] [trees]`.
/// The first number is the farm size and the second the tree count; the
/// method may appear anywhere. Missing values keep their defaults.
pub fn parse_carbon_args(args: &[&str]) -> Result<CarbonInputs, String> {
    let mut inputs = CarbonInputs::default();
    let mut numbers_seen = 0;

    for arg in args {
        if let Ok(method) = arg.parse::<FarmingMethod>() {
            inputs.method = method;
            continue;
        }

        match numbers_seen {
            0 => {
                inputs.farm_size_acres = arg
                    .parse::<f64>()
                    .map_err(|_| format!("❌ Invalid farm size '{}'. Example: `$carbon 5 organic 50`", arg))?;
            }
            1 => {
                inputs.trees_planted = arg
                    .parse::<u32>()
                    .map_err(|_| format!("❌ Invalid tree count '{}'. Use a whole number", arg))?;
            }
            _ => return Err(format!("❌ Unexpected argument '{}'. Usage: `$carbon [acres] [organic|conventional] [trees]`", arg)),
        }
        numbers_seen += 1;
    }

    Ok(inputs)
}

/// Format rupees with thousands separators, e.g. `12,345.50`
pub fn format_rupees(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}
