//! CSV file price data adapter.
//!
//! One file per ticker, `<dir>/<CODE>.csv`, with a header row. Columns are
//! found by name (case-insensitive), so extra columns such as `Change` are
//! ignored and column order does not matter.

use crate::domain::error::ChartError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::PriceDataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

const COLUMNS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, code: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", code))
    }
}

struct ColumnIndex([usize; 6]);

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord, code: &str) -> Result<Self, ChartError> {
        let mut index = [0usize; 6];
        for (slot, name) in index.iter_mut().zip(COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| ChartError::DataUnavailable {
                    code: code.to_string(),
                    reason: format!("missing {} column", name),
                })?;
        }
        Ok(Self(index))
    }
}

fn field<'r>(
    record: &'r csv::StringRecord,
    columns: &ColumnIndex,
    which: usize,
    code: &str,
) -> Result<&'r str, ChartError> {
    record
        .get(columns.0[which])
        .map(str::trim)
        .ok_or_else(|| ChartError::DataUnavailable {
            code: code.to_string(),
            reason: format!("missing {} value", COLUMNS[which]),
        })
}

fn parse_price(raw: &str, which: usize, code: &str) -> Result<f64, ChartError> {
    raw.parse().map_err(|e| ChartError::DataUnavailable {
        code: code.to_string(),
        reason: format!("invalid {} value {:?}: {}", COLUMNS[which], raw, e),
    })
}

/// Whole shares; exports that write volume as a float are rounded.
fn parse_volume(raw: &str, code: &str) -> Result<i64, ChartError> {
    raw.parse::<i64>()
        .or_else(|_| raw.parse::<f64>().map(|v| v.round() as i64))
        .map_err(|e| ChartError::DataUnavailable {
            code: code.to_string(),
            reason: format!("invalid volume value {:?}: {}", raw, e),
        })
}

impl PriceDataPort for CsvPriceAdapter {
    fn fetch_ohlcv(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, ChartError> {
        let path = self.csv_path(code);
        let content = fs::read_to_string(&path).map_err(|e| ChartError::DataUnavailable {
            code: code.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| ChartError::DataUnavailable {
            code: code.to_string(),
            reason: format!("CSV header error: {}", e),
        })?;
        let columns = ColumnIndex::from_headers(headers, code)?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| ChartError::DataUnavailable {
                code: code.to_string(),
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = field(&record, &columns, 0, code)?;
            // timestamps like "2024-01-15 00:00:00" keep only the date part
            let date_part = date_str.split([' ', 'T']).next().unwrap_or(date_str);
            let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| {
                ChartError::DataUnavailable {
                    code: code.to_string(),
                    reason: format!("invalid date {:?}: {}", date_str, e),
                }
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            bars.push(OhlcvBar {
                date,
                open: parse_price(field(&record, &columns, 1, code)?, 1, code)?,
                high: parse_price(field(&record, &columns, 2, code)?, 2, code)?,
                low: parse_price(field(&record, &columns, 3, code)?, 3, code)?,
                close: parse_price(field(&record, &columns, 4, code)?, 4, code)?,
                volume: parse_volume(field(&record, &columns, 5, code)?, code)?,
            });
        }

        bars.sort_by_key(|b| b.date);
        let before = bars.len();
        bars.dedup_by_key(|b| b.date);
        if bars.len() != before {
            tracing::warn!(code, dropped = before - bars.len(), "duplicate dates in price file");
        }

        tracing::debug!(code, rows = bars.len(), path = %path.display(), "loaded prices");
        Ok(bars)
    }
}
