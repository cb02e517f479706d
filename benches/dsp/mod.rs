//! Benchmarks for low-level DSP primitives.

mod correlate;
mod fft;
mod fir;

pub use correlate::bench_correlate;
pub use fft::bench_fft;
pub use fir::bench_fir;
