//! Low-level numerics used by the block engines.
//!
//! Everything here is allocation-free once constructed, and either pure
//! (vector helpers, correlation, design functions) or owns only the state
//! its caller asked for (FIR history, oscillator phase, FFT scratch). The
//! engines layer the per-mode algorithms and their state machines on top.

/// Fixed-size blocks and vector arithmetic.
pub mod block;
/// Template cross-correlation for matched filtering.
pub mod correlate;
/// Block FIR filter and windowed-sinc design.
pub mod fir;
/// Sine, reference and chirp generators.
pub mod oscillator;
/// FFT plans, spectral shift and Hermitian reconstruction.
pub mod spectrum;
/// Window functions.
pub mod window;

pub use block::{Block, SILENCE};
