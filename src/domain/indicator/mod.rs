//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorValue`: a defined number, a warm-up gap, or a saturated oscillator
//! - `IndicatorPoint`: a single dated point in an indicator time series
//! - `IndicatorType`: indicator identity + parameters
//! - `IndicatorSeries`: a time series aligned index-for-index with its bars

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stddev;

pub use bollinger::calculate_bollinger;
pub use ema::ewma;
pub use macd::calculate_macd;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stddev::calculate_stddev;

use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    /// Not enough history yet for the indicator's window.
    Undefined,
    Simple(f64),
    /// The ratio behind a bounded oscillator divided by zero; plots at the
    /// series ceiling (see [`IndicatorType::ceiling`]).
    Saturated,
}

impl IndicatorValue {
    pub fn is_defined(&self) -> bool {
        !matches!(self, IndicatorValue::Undefined)
    }

    /// The computed number, if there is one. Saturated points have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            IndicatorValue::Simple(v) => Some(*v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Stddev(usize),
    Rsi(usize),
    BollingerUpper {
        period: usize,
        stddev_mult_x100: u32,
    },
    BollingerLower {
        period: usize,
        stddev_mult_x100: u32,
    },
    Macd {
        fast: usize,
        slow: usize,
    },
    MacdSignal {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    MacdHistogram {
        fast: usize,
        slow: usize,
        signal: usize,
    },
}

impl IndicatorType {
    /// Upper bound of a bounded oscillator; where saturated points are drawn.
    pub fn ceiling(&self) -> Option<f64> {
        match self {
            IndicatorType::Rsi(_) => Some(100.0),
            _ => None,
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Stddev(period) => write!(f, "STDDEV({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::BollingerUpper {
                period,
                stddev_mult_x100,
            } => write!(
                f,
                "BB_UPPER({},{})",
                period,
                *stddev_mult_x100 as f64 / 100.0
            ),
            IndicatorType::BollingerLower {
                period,
                stddev_mult_x100,
            } => write!(
                f,
                "BB_LOWER({},{})",
                period,
                *stddev_mult_x100 as f64 / 100.0
            ),
            IndicatorType::Macd { fast, slow } => write!(f, "MACD({},{})", fast, slow),
            IndicatorType::MacdSignal { fast, slow, signal } => {
                write!(f, "SIGNAL({},{},{})", fast, slow, signal)
            }
            IndicatorType::MacdHistogram { fast, slow, signal } => {
                write!(f, "HIST({},{},{})", fast, slow, signal)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Pairs each computed value with the date of the bar at the same index.
    pub fn from_values(
        indicator_type: IndicatorType,
        bars: &[OhlcvBar],
        values: impl IntoIterator<Item = IndicatorValue>,
    ) -> Self {
        let values = bars
            .iter()
            .zip(values)
            .map(|(bar, value)| IndicatorPoint {
                date: bar.date,
                value,
            })
            .collect();
        Self {
            indicator_type,
            values,
        }
    }

    /// A series with every point undefined.
    pub fn undefined(indicator_type: IndicatorType, bars: &[OhlcvBar]) -> Self {
        Self::from_values(
            indicator_type,
            bars,
            std::iter::repeat(IndicatorValue::Undefined),
        )
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value_at(&self, i: usize) -> Option<IndicatorValue> {
        self.values.get(i).map(|p| p.value)
    }

    /// Number of leading undefined points.
    pub fn warmup_len(&self) -> usize {
        self.values
            .iter()
            .take_while(|p| !p.value.is_defined())
            .count()
    }

    /// Values as a renderer consumes them: gaps are `None`, saturated points
    /// resolve to the indicator's ceiling.
    pub fn plot_values(&self) -> Vec<Option<f64>> {
        let ceiling = self.indicator_type.ceiling();
        self.values
            .iter()
            .map(|p| match p.value {
                IndicatorValue::Undefined => None,
                IndicatorValue::Simple(v) => Some(v),
                IndicatorValue::Saturated => ceiling,
            })
            .collect()
    }

    /// The trailing `n` points.
    pub fn tail(&self, n: usize) -> IndicatorSeries {
        let start = self.values.len().saturating_sub(n);
        IndicatorSeries {
            indicator_type: self.indicator_type,
            values: self.values[start..].to_vec(),
        }
    }
}
