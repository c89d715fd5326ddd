//! RSI (Relative Strength Index) indicator implementation.
//!
//! Average gain/loss are plain trailing means over the last n price changes
//! (no Wilder smoothing):
//! - change[i] = C[i] - C[i-1], gain = max(change, 0), loss = max(-change, 0)
//! - avg_gain[i] = mean(gain over changes i-n+1..=i), likewise avg_loss
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0 the point is `Saturated` (drawn at 100).
//!
//! Warmup: first n bars are undefined (need n price changes).

use crate::domain::indicator::{IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_rsi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    if period == 0 || bars.len() < 2 {
        return IndicatorSeries::undefined(IndicatorType::Rsi(period), bars);
    }

    // changes[k] is the move into bar k + 1
    let changes: Vec<f64> = bars.windows(2).map(|w| w[1].close - w[0].close).collect();

    let values = (0..bars.len()).map(|i| {
        if i < period {
            return IndicatorValue::Undefined;
        }
        let window = &changes[i - period..i];
        let avg_gain = window.iter().map(|c| c.max(0.0)).sum::<f64>() / period as f64;
        let avg_loss = window.iter().map(|c| (-c).max(0.0)).sum::<f64>() / period as f64;
        rsi_from_averages(avg_gain, avg_loss)
    });

    IndicatorSeries::from_values(IndicatorType::Rsi(period), bars, values)
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> IndicatorValue {
    if avg_loss == 0.0 {
        return IndicatorValue::Saturated;
    }
    IndicatorValue::Simple(100.0 - (100.0 / (1.0 + avg_gain / avg_loss)))
}
