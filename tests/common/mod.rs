#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
pub use stockchart::domain::error::ChartError;
pub use stockchart::domain::ohlcv::OhlcvBar;
use stockchart::ports::data_port::PriceDataPort;

pub struct MockPriceDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockPriceDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, code: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(code.to_string(), bars);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl PriceDataPort for MockPriceDataPort {
    fn fetch_ohlcv(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, ChartError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(ChartError::DataUnavailable {
                code: code.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(code)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn make_bar(date_str: &str, close: f64) -> OhlcvBar {
    OhlcvBar {
        date: date(date_str),
        open: close - 0.5,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 10_000,
    }
}

/// Daily bars ending on `end`, one per calendar day, closes from `closes`.
pub fn bars_ending(end: NaiveDate, closes: &[f64]) -> Vec<OhlcvBar> {
    let n = closes.len() as i64;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar {
            date: end - Duration::days(n - 1 - i as i64),
            open: close - 0.5,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 10_000 + i as i64 * 10,
        })
        .collect()
}

/// A wavy price path with both gains and losses.
pub fn generate_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + 10.0 * (i as f64 * 0.3).sin() + i as f64 * 0.1)
        .collect()
}

pub fn write_price_csv(dir: &Path, code: &str, bars: &[OhlcvBar]) {
    let mut file = std::fs::File::create(dir.join(format!("{}.csv", code))).unwrap();
    writeln!(file, "Date,Open,High,Low,Close,Volume,Change").unwrap();
    for b in bars {
        writeln!(
            file,
            "{},{},{},{},{},{},0.0",
            b.date, b.open, b.high, b.low, b.close, b.volume
        )
        .unwrap();
    }
}
