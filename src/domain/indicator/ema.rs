//! Exponentially weighted moving average.
//!
//! α = 2/(span+1), EWMA[0] = x[0], then EWMA[i] = α·x[i] + (1-α)·EWMA[i-1].
//! Seeded from the first value, so every input carries a value (no warm-up gap).

/// The recurrence over any sequence. `span` must be at least 1.
pub fn ewma(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &v in values {
        let next = match prev {
            None => v,
            Some(p) => alpha * v + (1.0 - alpha) * p,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}
