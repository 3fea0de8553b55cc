use crate::config::settings::DatasetConfig;
use crate::data::generator::generate_table;
use crate::error::EngineError;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use shared::models::{PriceRow, PriceTable};
use shared::utils::{format_date, parse_date};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

pub const DATE_COLUMN: &str = "Date";

/// Reads and writes the backing CSV artifact.
// Header: Date,AAPL,GOOGL,...
// Row:    2024-01-01,100,200,...
pub struct PriceCsvStore;

impl PriceCsvStore {
    /// Reuses the table at `path` verbatim if the file exists; otherwise generates it from
    /// `config`, persists it and returns it.
    pub fn load_or_generate<P: AsRef<Path>>(path: P, config: &DatasetConfig) -> Result<PriceTable, EngineError> {
        let path = path.as_ref();
        if path.try_exists()? {
            tracing::info!(path = %path.display(), "Loading price table from existing CSV");
            return Self::read_table(path);
        }

        tracing::info!(path = %path.display(), "No price table found, generating synthetic data");
        let table = generate_table(config)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Self::write_table(path, &table)?;
        Ok(table)
    }

    pub fn write_table<P: AsRef<Path>>(path: P, table: &PriceTable) -> Result<(), EngineError> {
        let mut wtr = WriterBuilder::new().from_path(path.as_ref())?;

        let header = std::iter::once(DATE_COLUMN).chain(table.columns().iter().map(String::as_str));
        wtr.write_record(header)?;

        for row in table.rows() {
            let mut record = Vec::with_capacity(row.values.len() + 1);
            record.push(format_date(row.date));
            record.extend(row.values.iter().map(|v| v.to_string()));
            wtr.write_record(&record)?;
        }
        wtr.flush()?;

        tracing::debug!(path = %path.as_ref().display(), rows = table.len(), "Wrote price table");
        Ok(())
    }

    pub fn read_table<P: AsRef<Path>>(path: P) -> Result<PriceTable, EngineError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // field counts are checked below so the error names the line
            .from_reader(BufReader::new(file));

        let headers = rdr.headers()?.clone();
        let columns = Self::parse_header(&headers)?;

        let mut rows: Vec<PriceRow> = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result?;
            let row = Self::parse_row(&record, columns.len(), line)?;

            if let Some(prev) = rows.last() {
                if row.date <= prev.date {
                    return Err(EngineError::CsvDataFormatError(format!(
                        "Date {} at line {} does not follow {}",
                        row.date, line, prev.date
                    )));
                }
            }
            rows.push(row);
        }

        tracing::debug!(path = %path.display(), rows = rows.len(), series = columns.len(), "Read price table");
        Ok(PriceTable::new(columns, rows))
    }

    fn parse_header(headers: &StringRecord) -> Result<Vec<String>, EngineError> {
        let mut fields = headers.iter().map(str::trim);
        match fields.next() {
            Some(DATE_COLUMN) => {}
            Some("") | None => return Err(EngineError::CsvDataFormatError("Missing header line".to_string())),
            Some(other) => {
                return Err(EngineError::CsvDataFormatError(format!(
                    "First column must be '{}', found '{}'",
                    DATE_COLUMN, other
                )))
            }
        }

        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for name in fields {
            if name.is_empty() {
                return Err(EngineError::CsvDataFormatError("Empty series name in header".to_string()));
            }
            if !seen.insert(name) {
                return Err(EngineError::CsvDataFormatError(format!("Duplicate series '{}' in header", name)));
            }
            columns.push(name.to_string());
        }
        Ok(columns)
    }

    fn parse_row(record: &StringRecord, series_count: usize, line: usize) -> Result<PriceRow, EngineError> {
        if record.len() != series_count + 1 {
            return Err(EngineError::CsvDataFormatError(format!(
                "Expected {} fields at line {}, found {}",
                series_count + 1,
                line,
                record.len()
            )));
        }

        let date_str = record.get(0).unwrap_or_default();
        let date = parse_date(date_str).ok_or_else(|| {
            EngineError::CsvDataFormatError(format!("Unparseable date '{}' at line {}", date_str, line))
        })?;

        let values = record
            .iter()
            .skip(1)
            .map(|cell| match cell.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(EngineError::CsvDataFormatError(format!(
                    "Non-numeric value '{}' at line {}",
                    cell, line
                ))),
            })
            .collect::<Result<Vec<f64>, EngineError>>()?;

        Ok(PriceRow { date, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::SeriesSpec;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    fn small_config() -> DatasetConfig {
        DatasetConfig {
            series: vec![SeriesSpec::new("AAPL", 100.0), SeriesSpec::new("KO", 50.5)],
            start: NaiveDate::from_ymd_opt(2024, 2, 27).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        }
    }

    #[test]
    fn test_generate_persists_expected_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        PriceCsvStore::load_or_generate(&path, &small_config()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Date,AAPL,KO"));
        assert_eq!(lines.next(), Some("2024-02-27,100,50.5"));
        assert_eq!(lines.next(), Some("2024-02-28,101,51.5"));
        assert_eq!(lines.next(), Some("2024-02-29,102,52.5"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_generation_is_byte_identical() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");
        PriceCsvStore::load_or_generate(&first, &DatasetConfig::default()).unwrap();
        PriceCsvStore::load_or_generate(&second, &DatasetConfig::default()).unwrap();
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_round_trip_default_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        let generated = PriceCsvStore::load_or_generate(&path, &DatasetConfig::default()).unwrap();
        let reloaded = PriceCsvStore::read_table(&path).unwrap();
        assert_eq!(generated, reloaded);
    }

    #[test]
    fn test_existing_file_is_reused_verbatim() {
        let file = create_test_csv("Date,ZZZ\n2020-05-01,7\n2020-05-02,8.25");
        let table = PriceCsvStore::load_or_generate(file.path(), &DatasetConfig::default()).unwrap();
        assert_eq!(table.columns(), &["ZZZ".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].date, NaiveDate::from_ymd_opt(2020, 5, 2).unwrap());
        assert_eq!(table.rows()[1].values, vec![8.25]);
    }

    #[test]
    fn test_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("prices.csv");
        PriceCsvStore::load_or_generate(&path, &small_config()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_read_accepts_timestamp_dates() {
        let file = create_test_csv("Date,AAPL\n2024-01-01 00:00:00,100\n2024-01-02 00:00:00,101");
        let table = PriceCsvStore::read_table(file.path()).unwrap();
        assert_eq!(table.first_date(), NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn test_read_empty_file_is_missing_header() {
        let file = NamedTempFile::new().unwrap();
        let err = PriceCsvStore::read_table(file.path()).unwrap_err();
        assert!(err.to_string().contains("Missing header"));
    }

    #[test]
    fn test_read_header_without_date_column() {
        let file = create_test_csv("AAPL,KO\n100,50");
        let err = PriceCsvStore::read_table(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::CsvDataFormatError(_)));
        assert!(err.to_string().contains("First column must be 'Date'"));
    }

    #[test]
    fn test_read_non_numeric_cell() {
        let file = create_test_csv("Date,AAPL\n2024-01-01,abc");
        let err = PriceCsvStore::read_table(file.path()).unwrap_err();
        assert!(err.to_string().contains("Non-numeric value 'abc' at line 2"));
    }

    #[test]
    fn test_read_unparseable_date() {
        let file = create_test_csv("Date,AAPL\n01/01/2024,100");
        let err = PriceCsvStore::read_table(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unparseable date '01/01/2024'"));
    }

    #[test]
    fn test_read_short_row() {
        let file = create_test_csv("Date,AAPL,KO\n2024-01-01,100");
        let err = PriceCsvStore::read_table(file.path()).unwrap_err();
        assert!(err.to_string().contains("Expected 3 fields at line 2, found 2"));
    }

    #[test]
    fn test_read_out_of_order_dates() {
        let file = create_test_csv("Date,AAPL\n2024-01-02,100\n2024-01-01,101");
        let err = PriceCsvStore::read_table(file.path()).unwrap_err();
        assert!(err.to_string().contains("does not follow"));
    }

    #[test]
    fn test_read_duplicate_series() {
        let file = create_test_csv("Date,AAPL,AAPL\n2024-01-01,1,2");
        assert!(PriceCsvStore::read_table(file.path()).is_err());
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let result = PriceCsvStore::read_table("non_existent_prices.csv");
        assert!(matches!(result, Err(EngineError::IoError { .. })));
    }
}
