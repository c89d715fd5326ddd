//! Indicator engine: every series the chart needs, computed from one price
//! series in a single pass and trimmed to the visible window.

use crate::domain::indicator::bollinger::{self, calculate_bollinger};
use crate::domain::indicator::macd::{self, calculate_macd};
use crate::domain::indicator::rsi::{self, calculate_rsi};
use crate::domain::indicator::{calculate_sma, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

/// Extra history fetched ahead of the visible window so windowed
/// indicators are warmed up by its first row.
pub const LOOKBACK_PADDING_DAYS: usize = 50;

/// Main-panel moving averages (red, green, blue on the chart).
pub const DEFAULT_MAIN_PANEL_AVERAGES: [usize; 3] = [5, 10, 30];

#[derive(Debug, Clone, PartialEq)]
pub struct EngineParams {
    pub ma_period: usize,
    pub bb_stddev_mult_x100: u32,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            ma_period: bollinger::DEFAULT_PERIOD,
            bb_stddev_mult_x100: bollinger::DEFAULT_STDDEV_MULT_X100,
            rsi_period: rsi::DEFAULT_PERIOD,
            macd_fast: macd::DEFAULT_FAST,
            macd_slow: macd::DEFAULT_SLOW,
            macd_signal: macd::DEFAULT_SIGNAL,
        }
    }
}

impl EngineParams {
    /// Shortest visible window whose first row has every windowed value.
    pub fn min_window(&self) -> usize {
        self.ma_period.max(self.rsi_period + 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub ma: IndicatorSeries,
    pub bb_upper: IndicatorSeries,
    pub bb_lower: IndicatorSeries,
    pub rsi: IndicatorSeries,
    pub macd: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub hist: IndicatorSeries,
}

impl IndicatorSet {
    fn all_undefined(bars: &[OhlcvBar], params: &EngineParams) -> Self {
        let bb = |lower: bool| {
            let (period, stddev_mult_x100) = (params.ma_period, params.bb_stddev_mult_x100);
            if lower {
                IndicatorType::BollingerLower {
                    period,
                    stddev_mult_x100,
                }
            } else {
                IndicatorType::BollingerUpper {
                    period,
                    stddev_mult_x100,
                }
            }
        };
        let (fast, slow, signal) = (params.macd_fast, params.macd_slow, params.macd_signal);

        Self {
            ma: IndicatorSeries::undefined(IndicatorType::Sma(params.ma_period), bars),
            bb_upper: IndicatorSeries::undefined(bb(false), bars),
            bb_lower: IndicatorSeries::undefined(bb(true), bars),
            rsi: IndicatorSeries::undefined(IndicatorType::Rsi(params.rsi_period), bars),
            macd: IndicatorSeries::undefined(IndicatorType::Macd { fast, slow }, bars),
            signal: IndicatorSeries::undefined(
                IndicatorType::MacdSignal { fast, slow, signal },
                bars,
            ),
            hist: IndicatorSeries::undefined(
                IndicatorType::MacdHistogram { fast, slow, signal },
                bars,
            ),
        }
    }

    /// Number of rows every series shares.
    pub fn len(&self) -> usize {
        self.ma.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ma.is_empty()
    }

    /// Keeps the trailing `n` rows of every series.
    pub fn tail(&self, n: usize) -> IndicatorSet {
        IndicatorSet {
            ma: self.ma.tail(n),
            bb_upper: self.bb_upper.tail(n),
            bb_lower: self.bb_lower.tail(n),
            rsi: self.rsi.tail(n),
            macd: self.macd.tail(n),
            signal: self.signal.tail(n),
            hist: self.hist.tail(n),
        }
    }
}

/// Computes every indicator over the full series. Fewer than two bars yield
/// all-undefined series of matching length instead of an error.
pub fn compute(bars: &[OhlcvBar], params: &EngineParams) -> IndicatorSet {
    if bars.len() < 2 {
        tracing::debug!(rows = bars.len(), "too few rows for indicators");
        return IndicatorSet::all_undefined(bars, params);
    }

    let bands = calculate_bollinger(bars, params.ma_period, params.bb_stddev_mult_x100);
    let macd = calculate_macd(
        bars,
        params.macd_fast,
        params.macd_slow,
        params.macd_signal,
    );

    tracing::debug!(rows = bars.len(), "computed indicators");

    IndicatorSet {
        ma: bands.middle,
        bb_upper: bands.upper,
        bb_lower: bands.lower,
        rsi: calculate_rsi(bars, params.rsi_period),
        macd: macd.line,
        signal: macd.signal,
        hist: macd.histogram,
    }
}

/// Computes over the full series, then keeps the trailing `ndays` rows.
pub fn compute_window(bars: &[OhlcvBar], ndays: usize, params: &EngineParams) -> IndicatorSet {
    compute(bars, params).tail(ndays)
}

/// Main-panel moving averages over the visible bars only, so longer periods
/// show a warm-up gap inside the window.
pub fn main_panel_averages(visible: &[OhlcvBar], periods: &[usize]) -> Vec<IndicatorSeries> {
    periods.iter().map(|&p| calculate_sma(visible, p)).collect()
}
