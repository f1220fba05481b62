//! Whole-signal reductions used by the signal-only builtins
//! (`integral`, `ddt`, `rms`).
//!
//! Each routine returns a time history with the same x axis as its input.

use super::signal::Signal;

/// Cumulative trapezoidal integral of y over x, starting at zero.
pub fn integral(data: &Signal) -> Signal {
    if data.len() < 2 {
        return data.clone();
    }
    let (x, y) = (data.x(), data.y());
    let mut out = Vec::with_capacity(y.len());
    let mut accum = 0.0;
    out.push(accum);
    for i in 1..y.len() {
        accum += 0.5 * (y[i] + y[i - 1]) * (x[i] - x[i - 1]);
        out.push(accum);
    }
    data.with_y(out)
}

/// Backward-difference derivative dy/dx. The first sample is zero.
///
/// Repeated x values yield an infinite or NaN slope.
pub fn derivative(data: &Signal) -> Signal {
    if data.len() < 2 {
        return data.with_y(vec![0.0; data.len()]);
    }
    let (x, y) = (data.x(), data.y());
    let mut out = Vec::with_capacity(y.len());
    out.push(0.0);
    for i in 1..y.len() {
        out.push((y[i] - y[i - 1]) / (x[i] - x[i - 1]));
    }
    data.with_y(out)
}

/// Running root-mean-square: sample `i` is the RMS of `y[0..=i]`.
pub fn rms(data: &Signal) -> Signal {
    let mut sum_sq = 0.0;
    let out = data
        .y()
        .iter()
        .enumerate()
        .map(|(i, v)| {
            sum_sq += v * v;
            (sum_sq / (i + 1) as f64).sqrt()
        })
        .collect();
    data.with_y(out)
}
