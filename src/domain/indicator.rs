//! Rolling-window statistics over close prices.
//!
//! All functions return a vector aligned with the input: positions where the
//! trailing window is not yet full hold `None`.

/// Simple moving average over a trailing window.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if window == 0 || i + 1 < window {
            out.push(None);
            continue;
        }
        let start = i + 1 - window;
        let slice = &values[start..=i];
        out.push(Some(slice.iter().sum::<f64>() / window as f64));
    }
    out
}

/// Sample standard deviation (divisor N-1) over a trailing window.
///
/// Requires `window >= 2`; smaller windows yield `None` everywhere.
pub fn rolling_stddev(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if window < 2 || i + 1 < window {
            out.push(None);
            continue;
        }
        let start = i + 1 - window;
        let slice = &values[start..=i];
        out.push(Some(sample_stddev(slice)));
    }
    out
}

/// Sample standard deviation of a full slice (divisor N-1).
///
/// Returns 0.0 for slices shorter than two elements.
pub fn sample_stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    variance.sqrt()
}
