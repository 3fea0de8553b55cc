// Engine settings: listener address, backing CSV location and the synthetic dataset shape.
// Defaults reproduce the stock list and 2024 calendar the app has always shipped with;
// a JSON file and a few environment variables can override them.
use crate::error::EngineError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::SeriesSpec;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "STOCKVIEW_CONFIG";
pub const DATA_PATH_ENV: &str = "STOCKVIEW_DATA_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    pub dataset: DatasetConfig,
}

/// Which series to synthesize and over which (inclusive) calendar range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub series: Vec<SeriesSpec>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "127.0.0.1".to_string(),
            port: 5000,
            data_path: PathBuf::from("dummy_stock_data.csv"),
            dataset: DatasetConfig::default(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            series: vec![
                SeriesSpec::new("AAPL", 100.0),
                SeriesSpec::new("GOOGL", 200.0),
                SeriesSpec::new("MSFT", 150.0),
                SeriesSpec::new("AMZN", 250.0), // Tech
                SeriesSpec::new("JNJ", 120.0),  // Healthcare
                SeriesSpec::new("KO", 50.0),    // Beverage
                SeriesSpec::new("XOM", 60.0),   // Energy
                SeriesSpec::new("IBM", 170.0),  // Tech
                SeriesSpec::new("PFE", 110.0),  // Healthcare
                SeriesSpec::new("PEP", 55.0),   // Beverage
                SeriesSpec::new("CVX", 65.0),   // Energy
            ],
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
        }
    }
}

impl DatasetConfig {
    /// Rejects configurations the generator can't turn into a well-formed table.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.start > self.end {
            return Err(EngineError::ConfigError(format!(
                "dataset start {} is after end {}",
                self.start, self.end
            )));
        }
        if self.series.is_empty() {
            return Err(EngineError::ConfigError("dataset has no series".to_string()));
        }
        let mut seen = HashSet::new();
        for spec in &self.series {
            let name = spec.name.trim();
            if name.is_empty() || name.eq_ignore_ascii_case("date") {
                return Err(EngineError::ConfigError(format!("invalid series name '{}'", spec.name)));
            }
            if !seen.insert(name) {
                return Err(EngineError::ConfigError(format!("duplicate series name '{}'", name)));
            }
            if !spec.base_offset.is_finite() {
                return Err(EngineError::ConfigError(format!("base offset of '{}' is not finite", name)));
            }
        }
        Ok(())
    }
}

impl EngineSettings {
    /// Defaults, then the JSON file named by `STOCKVIEW_CONFIG` (if set), then env overrides.
    pub fn load() -> Result<Self, EngineError> {
        let settings = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        settings.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let settings: EngineSettings = serde_json::from_str(&raw).map_err(|e| {
            EngineError::ConfigError(format!("Failed to parse config file '{}': {}", path.display(), e))
        })?;
        settings.dataset.validate()?;
        Ok(settings)
    }

    /// Applies `HOST`, `PORT` and `STOCKVIEW_DATA_PATH` from `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| EngineError::ConfigError(format!("PORT must be a valid number, got '{}'", port)))?;
        }
        if let Some(path) = lookup(DATA_PATH_ENV) {
            self.data_path = PathBuf::from(path);
        }
        Ok(self)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
