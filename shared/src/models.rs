use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One day of prices, one value per declared series (same order as `PriceTable::columns`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub values: Vec<f64>,
}

/// Daily prices for a fixed set of series aligned on a shared, ascending date axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceTable {
    columns: Vec<String>,
    rows: Vec<PriceRow>,
}

impl PriceTable {
    /// Builds a table without checking row shape. Callers that read untrusted
    /// input go through the csv store, which validates before calling this.
    pub fn new(columns: Vec<String>, rows: Vec<PriceRow>) -> Self {
        PriceTable { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }
}

/// A named series and the base value its synthetic ramp starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub name: String,
    pub base_offset: f64,
}

impl SeriesSpec {
    pub fn new(name: &str, base_offset: f64) -> Self {
        SeriesSpec {
            name: name.to_string(),
            base_offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// A single series pulled out of a `PriceTable`, ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    pub name: String,
    pub points: Vec<PricePoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown time window '{0}', expected one of all_time, prev_week, prev_month, prev_year")]
pub struct ParseTimeWindowError(pub String);

/// Relative date-range filter offered to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    #[default]
    AllTime,
    #[serde(rename = "prev_week")]
    PreviousWeek,
    #[serde(rename = "prev_month")]
    PreviousMonth,
    #[serde(rename = "prev_year")]
    PreviousYear,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::AllTime,
        TimeWindow::PreviousWeek,
        TimeWindow::PreviousMonth,
        TimeWindow::PreviousYear,
    ];

    /// Lookback in days; 0 means no filtering.
    pub fn lookback_days(self) -> i64 {
        match self {
            TimeWindow::AllTime => 0,
            TimeWindow::PreviousWeek => 7,
            TimeWindow::PreviousMonth => 30,
            TimeWindow::PreviousYear => 365,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::AllTime => "all_time",
            TimeWindow::PreviousWeek => "prev_week",
            TimeWindow::PreviousMonth => "prev_month",
            TimeWindow::PreviousYear => "prev_year",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::AllTime => "All Time",
            TimeWindow::PreviousWeek => "Previous Week",
            TimeWindow::PreviousMonth => "Previous Month",
            TimeWindow::PreviousYear => "Previous Year",
        }
    }

    /// Treats a missing or blank selector as `AllTime`.
    pub fn parse_optional(s: Option<&str>) -> Result<Self, ParseTimeWindowError> {
        match s.map(str::trim) {
            None | Some("") => Ok(TimeWindow::AllTime),
            Some(value) => value.parse(),
        }
    }
}

impl FromStr for TimeWindow {
    type Err = ParseTimeWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all_time" | "all" => Ok(TimeWindow::AllTime),
            "prev_week" | "previous_week" => Ok(TimeWindow::PreviousWeek),
            "prev_month" | "previous_month" => Ok(TimeWindow::PreviousMonth),
            "prev_year" | "previous_year" => Ok(TimeWindow::PreviousYear),
            _ => Err(ParseTimeWindowError(s.to_string())),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_time_window_parse_symbols_and_aliases() {
        assert_eq!("all_time".parse::<TimeWindow>().unwrap(), TimeWindow::AllTime);
        assert_eq!("prev_week".parse::<TimeWindow>().unwrap(), TimeWindow::PreviousWeek);
        assert_eq!("Previous_Month".parse::<TimeWindow>().unwrap(), TimeWindow::PreviousMonth);
        assert_eq!(" prev_year ".parse::<TimeWindow>().unwrap(), TimeWindow::PreviousYear);
    }

    #[test]
    fn test_time_window_parse_rejects_unknown() {
        let err = "prev_decade".parse::<TimeWindow>().unwrap_err();
        assert_eq!(err, ParseTimeWindowError("prev_decade".to_string()));
        assert!(err.to_string().contains("prev_decade"));
    }

    #[test]
    fn test_time_window_parse_optional_defaults_to_all_time() {
        assert_eq!(TimeWindow::parse_optional(None).unwrap(), TimeWindow::AllTime);
        assert_eq!(TimeWindow::parse_optional(Some("  ")).unwrap(), TimeWindow::AllTime);
        assert!(TimeWindow::parse_optional(Some("bogus")).is_err());
    }

    #[test]
    fn test_time_window_lookback_days() {
        let days: Vec<i64> = TimeWindow::ALL.iter().map(|w| w.lookback_days()).collect();
        assert_eq!(days, vec![0, 7, 30, 365]);
    }

    #[test]
    fn test_time_window_display_round_trips_through_from_str() {
        for window in TimeWindow::ALL {
            assert_eq!(window.to_string().parse::<TimeWindow>().unwrap(), window);
        }
        assert_eq!(TimeWindow::PreviousWeek.label(), "Previous Week");
    }

    #[test]
    fn test_price_table_lookup() {
        let table = PriceTable::new(
            vec!["AAPL".to_string(), "KO".to_string()],
            vec![
                PriceRow { date: date(2024, 1, 1), values: vec![100.0, 50.0] },
                PriceRow { date: date(2024, 1, 2), values: vec![101.0, 51.0] },
            ],
        );
        assert_eq!(table.column_index("KO"), Some(1));
        assert_eq!(table.column_index("MSFT"), None);
        assert_eq!(table.rows()[1].values[1], 51.0);
        assert_eq!(table.first_date(), Some(date(2024, 1, 1)));
        assert_eq!(table.last_date(), Some(date(2024, 1, 2)));
        assert!(!table.is_empty());
        assert!(PriceTable::default().is_empty());
    }
}
