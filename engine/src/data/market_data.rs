// Read side of the price data: window filtering, series selection and the
// process-wide store that request handlers share.
use crate::error::EngineError;
use chrono::{Duration, NaiveDate};
use shared::models::{PricePoint, PriceRow, PriceTable, SeriesData, TimeWindow};

/// Rows whose date lies in `[now - lookback, now]` (both ends inclusive), in their
/// original order. `AllTime` returns the table unchanged.
pub fn filter_by_window(table: &PriceTable, window: TimeWindow, now: NaiveDate) -> PriceTable {
    if window == TimeWindow::AllTime {
        return table.clone();
    }

    // Windows reaching past the earliest representable date start at that date.
    let from = now
        .checked_sub_signed(Duration::days(window.lookback_days()))
        .unwrap_or(NaiveDate::MIN);
    let rows: Vec<PriceRow> = table
        .rows()
        .iter()
        .filter(|row| row.date >= from && row.date <= now)
        .cloned()
        .collect();
    PriceTable::new(table.columns().to_vec(), rows)
}

/// Pulls the named columns out of `table`, in request order.
pub fn select_series(table: &PriceTable, names: &[String]) -> Result<Vec<SeriesData>, EngineError> {
    names
        .iter()
        .map(|name| {
            let idx = table
                .column_index(name)
                .ok_or_else(|| EngineError::UnknownSeries(name.clone()))?;
            let points = table
                .rows()
                .iter()
                .map(|row| {
                    let value = row.values.get(idx).copied().ok_or_else(|| {
                        EngineError::CsvDataFormatError(format!(
                            "Row {} has no value for series '{}'",
                            row.date, name
                        ))
                    })?;
                    Ok(PricePoint { date: row.date, value })
                })
                .collect::<Result<Vec<PricePoint>, EngineError>>()?;
            Ok(SeriesData {
                name: name.clone(),
                points,
            })
        })
        .collect()
}

/// Holds the price table loaded at startup. Never mutated afterwards, so handlers
/// share it through an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct MarketDataStore {
    table: PriceTable,
}

impl MarketDataStore {
    pub fn new(table: PriceTable) -> Self {
        MarketDataStore { table }
    }

    pub fn available_series(&self) -> &[String] {
        self.table.columns()
    }

    /// Filter by window first, then select; unknown names fail even when the window is empty.
    pub fn chart_data(
        &self,
        names: &[String],
        window: TimeWindow,
        now: NaiveDate,
    ) -> Result<Vec<SeriesData>, EngineError> {
        let filtered = filter_by_window(&self.table, window, now);
        tracing::debug!(
            %window,
            %now,
            rows = filtered.len(),
            total = self.table.len(),
            "Filtered price table"
        );
        select_series(&filtered, names)
    }
}
