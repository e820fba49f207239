//! Window primitives shared by the indicator implementations.
//!
//! Every helper returns a vector aligned one-to-one with its input. A slot is
//! NaN until a full window of defined values is available, and stays NaN
//! whenever any value inside its window is NaN.

/// Apply `f` to every trailing window of `window` values.
pub fn rolling_apply<F>(values: &[f64], window: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 {
        return out;
    }

    for end in window..=values.len() {
        let slice = &values[end - window..end];
        if slice.iter().all(|v| !v.is_nan()) {
            out[end - 1] = f(slice);
        }
    }

    out
}

/// Trailing arithmetic mean.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Trailing sum.
pub fn rolling_sum(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| w.iter().sum::<f64>())
}

/// Trailing sample standard deviation (n - 1 denominator).
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        if w.len() < 2 {
            return f64::NAN;
        }
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        let ss: f64 = w.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (w.len() - 1) as f64).sqrt()
    })
}

/// Trailing mean absolute deviation around the window mean.
pub fn rolling_mad(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        w.iter().map(|v| (v - mean).abs()).sum::<f64>() / w.len() as f64
    })
}

/// Trailing maximum.
pub fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| w.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Trailing minimum.
pub fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Recursive exponential mean with smoothing span `span`.
///
/// Seeded with the first defined value; NaN inputs after the seed carry the
/// previous mean forward.
pub fn ewm(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema: Option<f64> = None;

    for &value in values {
        ema = match ema {
            None if value.is_nan() => None,
            None => Some(value),
            Some(prev) if value.is_nan() => Some(prev),
            Some(prev) => Some((value - prev) * alpha + prev),
        };
        out.push(ema.unwrap_or(f64::NAN));
    }

    out
}

/// Division that yields NaN instead of infinities for a zero or undefined
/// denominator.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || denominator.is_nan() || numerator.is_nan() {
        f64::NAN
    } else {
        numerator / denominator
    }
}

/// First difference; the first slot has no predecessor and is NaN.
pub fn diff(values: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        out[i] = values[i] - values[i - 1];
    }
    out
}
