//! Static price cache
//!
//! Prices are stored as a flat JSON object mapping upper-case tickers to
//! prices, with an optional `date` entry recording when they were captured.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub prices: BTreeMap<String, f64>,
}

impl PriceSnapshot {
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self { date, prices: BTreeMap::new() }
    }

    /// Record a price; tickers are stored upper-case
    pub fn insert(&mut self, ticker: &str, price: f64) {
        self.prices.insert(ticker.to_uppercase(), price);
    }

    pub fn price(&self, ticker: &str) -> Option<f64> {
        self.prices.get(&ticker.to_uppercase()).copied()
    }

    /// Value of `shares` of `ticker`, if the ticker is cached
    pub fn position_value(&self, ticker: &str, shares: f64) -> Option<f64> {
        self.price(ticker).map(|price| price * shares)
    }
}

/// Read a previously saved snapshot
pub fn load_static_prices<P: AsRef<Path>>(path: P) -> Result<PriceSnapshot> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let snapshot: PriceSnapshot = serde_json::from_reader(reader)?;
    info!("loaded {} cached prices from {}", snapshot.prices.len(), path.as_ref().display());
    Ok(snapshot)
}

/// Write a snapshot, replacing any existing file
pub fn save_prices<P: AsRef<Path>>(path: P, snapshot: &PriceSnapshot) -> Result<()> {
    let writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(writer, snapshot)?;
    info!("saved {} prices to {}", snapshot.prices.len(), path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;
    use tempfile::TempDir;

    #[test]
    fn test_flat_json_format() {
        let snapshot: PriceSnapshot =
            serde_json::from_str(r#"{"AAPL": 189.5, "VTI": 240.25, "date": "2024-01-02"}"#).unwrap();
        assert_eq!(snapshot.date, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(snapshot.price("aapl"), Some(189.5));
        assert_eq!(snapshot.position_value("VTI", 4.0), Some(961.0));
        assert_eq!(snapshot.price("MSFT"), None);
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("static_prices.json");
        let mut snapshot = PriceSnapshot::new(NaiveDate::from_ymd_opt(2024, 6, 3));
        snapshot.insert("vxus", 60.12);
        snapshot.insert("BND", 71.8);

        save_prices(&path, &snapshot).unwrap();
        let loaded = load_static_prices(&path).unwrap();

        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.price("VXUS"), Some(60.12));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_static_prices("/nonexistent/dir/prices.json");
        assert!(matches!(result, Err(ForecastError::Io(_))));
    }
}
