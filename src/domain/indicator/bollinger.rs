//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! Where StdDev is the sample standard deviation (divides by N-1) over the
//! same window as the middle band.
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) bars are undefined.

use crate::domain::indicator::{
    calculate_sma, calculate_stddev, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_STDDEV_MULT_X100: u32 = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub middle: IndicatorSeries,
    pub upper: IndicatorSeries,
    pub lower: IndicatorSeries,
}

pub fn calculate_bollinger(
    bars: &[OhlcvBar],
    period: usize,
    stddev_mult_x100: u32,
) -> BollingerBands {
    let mult = stddev_mult_x100 as f64 / 100.0;
    let middle = calculate_sma(bars, period);
    let stddev = calculate_stddev(bars, period);

    let band = |sign: f64| {
        middle
            .values
            .iter()
            .zip(&stddev.values)
            .map(move |(m, s)| match (m.value, s.value) {
                (IndicatorValue::Simple(m), IndicatorValue::Simple(s)) => {
                    IndicatorValue::Simple(m + sign * mult * s)
                }
                _ => IndicatorValue::Undefined,
            })
    };

    let upper = IndicatorSeries::from_values(
        IndicatorType::BollingerUpper {
            period,
            stddev_mult_x100,
        },
        bars,
        band(1.0),
    );
    let lower = IndicatorSeries::from_values(
        IndicatorType::BollingerLower {
            period,
            stddev_mult_x100,
        },
        bars,
        band(-1.0),
    );

    BollingerBands {
        middle,
        upper,
        lower,
    }
}
