pub mod loader;

pub use loader::Dataset;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Could not load price dataset '{}': {reason}", .path.display())]
    DatasetUnavailable { path: PathBuf, reason: String },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("No price data found for crop '{0}'")]
    UnknownCrop(String),
}

pub type Result<T> = std::result::Result<T, DataError>;

/// Price dataset loaded once at startup and shared read-only with every command.
///
/// A failed load is kept rather than propagated so that only the market page
/// reports it; the rest of the dashboard keeps working.
#[derive(Debug)]
pub struct MarketStore {
    path: PathBuf,
    dataset: std::result::Result<Dataset, String>,
}

impl MarketStore {
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let dataset = match Dataset::load(&path) {
            Ok(dataset) => {
                info!(
                    "Loaded price dataset {} ({} crops, {} rows, {} skipped)",
                    path.display(),
                    dataset.crops().len(),
                    dataset.row_count(),
                    dataset.skipped_rows()
                );
                Ok(dataset)
            }
            Err(e) => {
                warn!("Market analytics unavailable: {}", e);
                Err(e.to_string())
            }
        };

        MarketStore { path, dataset }
    }

    /// The loaded dataset, or `DatasetUnavailable` if loading failed at startup
    pub fn dataset(&self) -> Result<&Dataset> {
        self.dataset.as_ref().map_err(|reason| DataError::DatasetUnavailable {
            path: self.path.clone(),
            reason: reason.clone(),
        })
    }

    pub fn is_available(&self) -> bool {
        self.dataset.is_ok()
    }
}

/// Handle stored in the client data map
pub type SharedMarketStore = Arc<MarketStore>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_unavailable_not_fatal() {
        let store = MarketStore::load("/nonexistent/farmeco/prices.csv");
        assert!(!store.is_available());

        match store.dataset() {
            Err(DataError::DatasetUnavailable { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/farmeco/prices.csv"));
            }
            other => panic!("expected DatasetUnavailable, got {:?}", other),
        }
    }
}
