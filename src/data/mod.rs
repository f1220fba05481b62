pub mod fft;
pub mod signal;
pub mod transforms;
