// stats.rs

//! Population statistics over a slice of values.
//!
//! Every function returns `None` on an empty slice; `variance` and `stddev`
//! are defined exactly when `mean` is.

use serde::Serialize;

/// Arithmetic mean. `None` on empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance (denominator `n`, not `n − 1`).
pub fn variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(sum_sq / values.len() as f64)
}

pub fn stddev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// The three statistics reported together by the Stats feature.
/// Serializes as `{"mean":…,"variance":…,"stddev":…}` with `null` for
/// undefined entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub mean: Option<f64>,
    pub variance: Option<f64>,
    pub stddev: Option<f64>,
}

impl Summary {
    pub fn of(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            variance: variance(values),
            stddev: stddev(values),
        }
    }
}
