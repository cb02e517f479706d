pub mod config; // Build-time sizes and parameters
pub mod dsp; // Numerics: FIR, FFT, correlation, oscillators
pub mod effects; // Flanger, ring modulator, bit-crusher and their dispatcher
pub mod engine; // System modes and the per-block program switch
pub mod io; // Block inputs/outputs and reports
pub mod modem; // QPSK over audio
pub mod radar; // Chirp ranging
pub mod spectral; // FFT frequency shifting and fast convolution

pub use config::{BLOCK_SIZE, SAMPLE_RATE};
pub use dsp::{Block, SILENCE};
pub use engine::{Engine, SystemMode};
pub use io::{BlockInput, InputSource, Report, ReportSink, Severity, StereoBlock};
