// Synthetic price data: each series is a linear ramp starting at its base offset.
use crate::config::settings::DatasetConfig;
use crate::error::EngineError;
use shared::models::{PriceRow, PriceTable};

/// Builds one row per day in `[config.start, config.end]`. The value of a series on
/// day index `i` is `base_offset + i`, so output depends only on the configuration.
pub fn generate_table(config: &DatasetConfig) -> Result<PriceTable, EngineError> {
    config.validate()?;

    let columns: Vec<String> = config.series.iter().map(|s| s.name.trim().to_string()).collect();
    let rows: Vec<PriceRow> = config
        .start
        .iter_days()
        .take_while(|date| *date <= config.end)
        .enumerate()
        .map(|(day_index, date)| PriceRow {
            date,
            values: config
                .series
                .iter()
                .map(|spec| spec.base_offset + day_index as f64)
                .collect(),
        })
        .collect();

    tracing::debug!(
        series = columns.len(),
        days = rows.len(),
        start = %config.start,
        end = %config.end,
        "Generated synthetic price table"
    );
    Ok(PriceTable::new(columns, rows))
}
