use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_DATASET_PATH: &str = "large_agri_dataset.csv";
pub const DEFAULT_CHART_WIDTH: u32 = 1024;
pub const DEFAULT_CHART_HEIGHT: u32 = 768;
pub const DEFAULT_COOLDOWN_SECS: u64 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings read from the environment (and `.env`, via dotenv)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub discord_token: String,
    pub dataset_path: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    pub cooldown_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let dataset_path = lookup("FARMECO_DATASET")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH));

        Ok(AppConfig {
            discord_token,
            dataset_path,
            chart_width: parse_or(&lookup, "FARMECO_CHART_WIDTH", DEFAULT_CHART_WIDTH)?,
            chart_height: parse_or(&lookup, "FARMECO_CHART_HEIGHT", DEFAULT_CHART_HEIGHT)?,
            cooldown_secs: parse_or(&lookup, "FARMECO_COOLDOWN_SECS", DEFAULT_COOLDOWN_SECS)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[("DISCORD_TOKEN", "abc")])).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from(DEFAULT_DATASET_PATH));
        assert_eq!(config.chart_width, DEFAULT_CHART_WIDTH);
        assert_eq!(config.cooldown_secs, DEFAULT_COOLDOWN_SECS);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("FARMECO_DATASET", "data/prices.csv"),
            ("FARMECO_CHART_HEIGHT", "600"),
            ("FARMECO_COOLDOWN_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("data/prices.csv"));
        assert_eq!(config.chart_height, 600);
        assert_eq!(config.cooldown_secs, 0);
    }

    #[test]
    fn test_missing_token_and_bad_numbers() {
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[])),
            Err(ConfigError::Missing("DISCORD_TOKEN"))
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[("DISCORD_TOKEN", "abc"), ("FARMECO_CHART_WIDTH", "wide")])),
            Err(ConfigError::Invalid { key: "FARMECO_CHART_WIDTH", .. })
        ));
    }
}
