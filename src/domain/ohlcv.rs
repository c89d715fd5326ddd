//! OHLCV bar representation and the time-ordered price series built from it.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl OhlcvBar {
    /// Candle colour direction: close at or above open counts as up.
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

/// Bars for one ticker, strictly increasing by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub code: String,
    pub bars: Vec<OhlcvBar>,
}

impl PriceSeries {
    /// Sorts by date and drops repeated dates, keeping the first occurrence.
    pub fn new(code: impl Into<String>, mut bars: Vec<OhlcvBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self {
            code: code.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The trailing `n` bars (all of them when fewer exist).
    pub fn tail(&self, n: usize) -> &[OhlcvBar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }
}
