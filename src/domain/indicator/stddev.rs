//! Rolling Standard Deviation indicator.
//!
//! Sample standard deviation (divides by n-1) over n closing prices.
//! STDDEV(n)[i] = sqrt(sum((C[i-j] - SMA(n)[i])^2 for j in 0..n) / (n - 1))
//! Warmup: first (n-1) bars are undefined. A period below 2 never produces a value.

use crate::domain::indicator::{IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_stddev(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    if period < 2 {
        return IndicatorSeries::undefined(IndicatorType::Stddev(period), bars);
    }

    let values = (0..bars.len()).map(|i| {
        if i + 1 < period {
            return IndicatorValue::Undefined;
        }
        let window = &bars[i + 1 - period..=i];
        IndicatorValue::Simple(sample_stddev(window.iter().map(|b| b.close)))
    });

    IndicatorSeries::from_values(IndicatorType::Stddev(period), bars, values)
}

/// Sample standard deviation; the caller guarantees at least two values.
pub(crate) fn sample_stddev(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let n = values.clone().count() as f64;
    let mean = values.clone().sum::<f64>() / n;
    let variance = values
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1.0);
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::{make_bars, simple};
    use approx::assert_relative_eq;

    #[test]
    fn stddev_warmup() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = calculate_stddev(&bars, 3);

        assert!(!series.values[0].value.is_defined());
        assert!(!series.values[1].value.is_defined());
        assert!(series.values[2].value.is_defined());
        assert!(series.values[4].value.is_defined());
    }

    #[test]
    fn stddev_constant_values() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0, 100.0]);
        let series = calculate_stddev(&bars, 3);
        assert_relative_eq!(simple(&series, 2), 0.0);
    }

    #[test]
    fn stddev_uses_n_minus_one() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_stddev(&bars, 3);
        // deviations -10, 0, 10 → 200 / 2 = 100 → 10
        assert_relative_eq!(simple(&series, 2), 10.0, epsilon = 1e-10);
    }

    #[test]
    fn stddev_known_values() {
        let bars = make_bars(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let series = calculate_stddev(&bars, 8);
        // sum of squared deviations is 32; 32 / 7
        assert_relative_eq!(simple(&series, 7), (32.0_f64 / 7.0).sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn stddev_period_one_is_undefined() {
        let bars = make_bars(&[10.0, 20.0]);
        let series = calculate_stddev(&bars, 1);
        assert_eq!(series.warmup_len(), 2);
        assert_eq!(series.indicator_type, IndicatorType::Stddev(1));
    }
}
