// Spectrum of a whole signal for the `fft` builtin.
// The window type is always available so configs stay portable; the
// transform itself needs the `fft` feature.
#[cfg(feature = "fft")]
use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};

#[cfg(feature = "fft")]
use super::signal::Signal;

/// Supported FFT window functions for spectral analysis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FftWindow {
    /// Rectangular (no windowing)
    Rect,
    /// Hann window
    #[default]
    Hann,
    /// Hamming window
    Hamming,
    /// Blackman window
    Blackman,
}

impl FftWindow {
    pub const ALL: &'static [FftWindow] = &[
        FftWindow::Rect,
        FftWindow::Hann,
        FftWindow::Hamming,
        FftWindow::Blackman,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FftWindow::Rect => "Rect",
            FftWindow::Hann => "Hann",
            FftWindow::Hamming => "Hamming",
            FftWindow::Blackman => "Blackman",
        }
    }

    /// Window weight for sample `n` of `len`.
    pub fn weight(&self, n: usize, len: usize) -> f64 {
        let phase = 2.0 * std::f64::consts::PI * n as f64 / len as f64;
        match self {
            FftWindow::Rect => 1.0,
            FftWindow::Hann => 0.5 - 0.5 * phase.cos(),
            FftWindow::Hamming => 0.54 - 0.46 * phase.cos(),
            FftWindow::Blackman => 0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos(),
        }
    }
}

/// One-sided amplitude spectrum of the whole signal.
///
/// The sample rate is estimated from the first and last x value, so x is
/// expected to be evenly spaced and increasing. The result's x axis is
/// frequency in 1/x units. Signals with fewer than two samples or a
/// non-increasing x range produce an empty signal.
#[cfg(feature = "fft")]
pub fn spectrum(data: &Signal, window: FftWindow) -> Signal {
    let n = data.len();
    if n < 2 {
        return Signal::default();
    }
    let (t0, t1) = (data.x()[0], data.x()[n - 1]);
    if !(t1 > t0) {
        return Signal::default();
    }
    let sample_rate = (n as f64 - 1.0) / (t1 - t0);

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    let mut buf: Vec<Complex<f64>> = data
        .y()
        .iter()
        .enumerate()
        .map(|(i, &v)| Complex {
            re: v * window.weight(i, n),
            im: 0.0,
        })
        .collect();
    fft.process(&mut buf);

    let half = n / 2;
    let scale = 2.0 / n as f64;
    let points: Vec<[f64; 2]> = buf
        .iter()
        .take(half)
        .enumerate()
        .map(|(k, c)| [k as f64 * sample_rate / n as f64, c.norm() * scale])
        .collect();
    Signal::from_points(&points)
}
