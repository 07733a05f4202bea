use super::{DataError, Result};
use crate::models::{CropSummary, PricePoint, PriceSeries};
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

const REQUIRED_COLUMNS: [&str; 3] = ["crop", "date", "price"];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// All crop price rows from the input file, grouped by crop.
/// Labels differing only in case are one crop, shown with the first-seen label.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    crops: Vec<String>,
    /// Keyed by [`crop_key`]
    points_by_crop: HashMap<String, Vec<PricePoint>>,
    rows: usize,
    skipped: usize,
}

impl Dataset {
    /// Locate the required columns, case-insensitively
    fn column_indices(headers: &csv::StringRecord) -> Result<[usize; 3]> {
        let mut indices = [0usize; 3];
        for (slot, column) in REQUIRED_COLUMNS.iter().enumerate() {
            indices[slot] = headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(column))
                .ok_or_else(|| DataError::MissingColumn(capitalize(column)))?;
        }
        Ok(indices)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| DataError::DatasetUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_reader(file)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let [crop_idx, date_idx, price_idx] = Self::column_indices(rdr.headers()?)?;

        let mut dataset = Dataset::default();
        for (line, result) in rdr.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    warn!("Skipping undecodable row {}: {}", line + 2, e);
                    dataset.skipped += 1;
                    continue;
                }
            };
            let (Some(crop), Some(date), Some(price)) =
                (record.get(crop_idx), record.get(date_idx), record.get(price_idx))
            else {
                warn!("Skipping short row {}", line + 2);
                dataset.skipped += 1;
                continue;
            };

            let Some(date) = parse_date(date) else {
                warn!("Skipping row {}: unparseable date '{}'", line + 2, date);
                dataset.skipped += 1;
                continue;
            };

            let price = match price.parse::<f64>() {
                Ok(p) if p.is_finite() && p >= 0.0 => p,
                _ => {
                    warn!("Skipping row {}: invalid price '{}'", line + 2, price);
                    dataset.skipped += 1;
                    continue;
                }
            };

            dataset.push(crop, PricePoint::new(date, price));
        }

        debug!(
            "Parsed {} price rows ({} skipped) across {} crops",
            dataset.rows,
            dataset.skipped,
            dataset.crops.len()
        );

        Ok(dataset)
    }

    fn push(&mut self, crop: &str, point: PricePoint) {
        if crop.is_empty() {
            self.skipped += 1;
            return;
        }
        let key = crop_key(crop);
        if !self.points_by_crop.contains_key(&key) {
            self.crops.push(crop.to_string());
        }
        self.points_by_crop.entry(key).or_default().push(point);
        self.rows += 1;
    }

    /// Crop labels in the order they first appear in the file
    pub fn crops(&self) -> &[String] {
        &self.crops
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped
    }

    /// Resolve a user-typed crop name to its label in the file
    pub fn resolve_crop(&self, name: &str) -> Option<&str> {
        let key = crop_key(name);
        self.crops
            .iter()
            .find(|c| crop_key(c) == key)
            .map(String::as_str)
    }

    /// Price history for one crop, sorted ascending by date
    pub fn series(&self, crop: &str) -> Result<PriceSeries> {
        let label = self
            .resolve_crop(crop)
            .ok_or_else(|| DataError::UnknownCrop(crop.trim().to_string()))?;

        let points = self.points_by_crop.get(&crop_key(label)).cloned().unwrap_or_default();
        Ok(PriceSeries::new(label, points))
    }

    /// One summary row per crop, in file order
    pub fn summaries(&self) -> Vec<CropSummary> {
        self.crops
            .iter()
            .filter_map(|crop| {
                let series = self.series(crop).ok()?;
                Some(CropSummary {
                    crop: crop.clone(),
                    points: series.len(),
                    first_date: series.first_date()?,
                    last_date: series.last_date()?,
                    last_price: series.last_price()?,
                })
            })
            .collect()
    }
}

/// Parse a calendar date, dropping any time-of-day part
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Grouping and lookup key for a crop label
fn crop_key(label: &str) -> String {
    label.trim().to_lowercase()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_csv_groups_and_sorts_by_crop() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Date,Crop,Price,Market").unwrap();
        writeln!(file, "2024-01-03,Rice,31.5,Delhi").unwrap();
        writeln!(file, "2024-01-01,Rice,30.0,Delhi").unwrap();
        writeln!(file, "2024-01-02,Wheat,22.0,Pune").unwrap();
        writeln!(file, "2024-01-02,Rice,30.5,Delhi").unwrap();

        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.crops(), &["Rice".to_string(), "Wheat".to_string()]);
        assert_eq!(dataset.row_count(), 4);

        let rice = dataset.series("rice").unwrap();
        assert_eq!(rice.crop(), "Rice");
        let prices: Vec<f64> = rice.points().iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![30.0, 30.5, 31.5]);
        assert_eq!(rice.last_date(), Some(date(2024, 1, 3)));
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let csv = "crop,DATE,price\nMaize,2023-05-01,12\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.series("MAIZE").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let csv = "Crop,Date,Cost\nRice,2024-01-01,10\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "Price"));
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let csv = "Crop,Date,Price\n\
                   Rice,2024-01-01,10\n\
                   Rice,not-a-date,11\n\
                   Rice,2024-01-03,abc\n\
                   Rice,2024-01-04,-2\n\
                   Rice,2024-01-05,12\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.skipped_rows(), 3);
    }

    #[test]
    fn test_labels_differing_in_case_are_one_crop() {
        let csv = "Crop,Date,Price\n\
                   Rice,2024-01-01,10\n\
                   rice,2024-01-02,11\n\
                   RICE,2024-01-03,12\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.crops(), &["Rice".to_string()]);

        let series = dataset.series("rice").unwrap();
        assert_eq!(series.crop(), "Rice");
        assert_eq!(series.len(), 3);
        assert_eq!(dataset.summaries()[0].points, 3);
    }

    #[test]
    fn test_undecodable_row_is_skipped() {
        let mut bytes = b"Crop,Date,Price\nRice,2024-01-01,10\n".to_vec();
        bytes.extend_from_slice(b"Ri\xffce,2024-01-02,11\n");
        bytes.extend_from_slice(b"Rice,2024-01-03,12\n");

        let dataset = Dataset::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.skipped_rows(), 1);
        assert_eq!(dataset.series("Rice").unwrap().last_price(), Some(12.0));
    }

    #[test]
    fn test_unknown_crop() {
        let csv = "Crop,Date,Price\nRice,2024-01-01,10\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert!(matches!(dataset.series("Cotton"), Err(DataError::UnknownCrop(_))));
    }

    #[test]
    fn test_missing_file_is_dataset_unavailable() {
        let err = Dataset::load("/nonexistent/large_agri_dataset.csv").unwrap_err();
        assert!(matches!(err, DataError::DatasetUnavailable { .. }));
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-02-29"), Some(date(2024, 2, 29)));
        assert_eq!(parse_date("29-02-2024"), Some(date(2024, 2, 29)));
        assert_eq!(parse_date("02/29/2024"), Some(date(2024, 2, 29)));
        assert_eq!(parse_date("2024-02-29 13:45:00"), Some(date(2024, 2, 29)));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_summaries() {
        let csv = "Crop,Date,Price\nRice,2024-01-02,11\nRice,2024-01-01,10\nOnion,2024-03-01,40\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        let summaries = dataset.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].crop, "Rice");
        assert_eq!(summaries[0].points, 2);
        assert_eq!(summaries[0].last_price, 11.0);
        assert_eq!(summaries[1].first_date, date(2024, 3, 1));
    }
}
