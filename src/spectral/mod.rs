//! Frequency-domain engines: the FFT frequency shifter and the overlap-add
//! fast convolver.

pub mod convolver;
pub mod shift;

pub use convolver::FastConvolver;
pub use shift::{FrequencyShifter, SpectralShift};
