//! Simple Moving Average over closing prices.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i])
//! Warmup: first (n-1) bars are undefined.

use crate::domain::indicator::{IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    if period == 0 {
        return IndicatorSeries::undefined(IndicatorType::Sma(period), bars);
    }

    let values = (0..bars.len()).map(|i| {
        if i + 1 < period {
            return IndicatorValue::Undefined;
        }
        let window = &bars[i + 1 - period..=i];
        IndicatorValue::Simple(window.iter().map(|b| b.close).sum::<f64>() / period as f64)
    });

    IndicatorSeries::from_values(IndicatorType::Sma(period), bars, values)
}
