use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use tracing::debug;

use crate::config::{
    BLOCK_SIZE, FAST_CONV_CUTOFF_HZ, FAST_CONV_FFT_LEN, FAST_CONV_TAPS, SAMPLE_RATE,
};
use crate::dsp::block::Block;
use crate::dsp::fir::design_lowpass;
use crate::dsp::spectrum::{load_real, FftPair};

/*
Overlap-Add Fast Convolution
============================

Direct FIR filtering costs L multiplies per output sample. In the frequency
domain, convolution becomes a bin-by-bin product, so for long filters it is
cheaper to:

    1. zero-pad the block (N) and the filter (L) to an FFT length ≥ N + L - 1
    2. FFT the block
    3. multiply by the (precomputed) filter spectrum
    4. inverse FFT

The result is N + L - 1 samples long: the full linear convolution of this
block. The first N go out now (plus the tail carried over from the previous
block); the last L - 1 are the new tail:

    block k:    [ y0 y1 ... yN-1 | t0 ... tL-2 ]
    block k+1:  [ y0+t0 ... ]

Output is sample-for-sample identical (up to rounding) to the direct-form
filter, with no extra latency.
*/

pub struct FastConvolver {
    fft: FftPair,
    filter_spectrum: Vec<Complex<f32>>,
    frame: Vec<Complex<f32>>,
    tail: Vec<f32>,
}

impl FastConvolver {
    /// Convolver for the configured low-pass.
    pub fn new() -> Self {
        let coeffs = design_lowpass(FAST_CONV_TAPS, FAST_CONV_CUTOFF_HZ, SAMPLE_RATE as f32);
        Self::with_coeffs(&coeffs)
    }

    /// Convolver for arbitrary time-reversed coefficients (same order as
    /// `FirFilter`). Panics if the filter does not fit the FFT length.
    pub fn with_coeffs(coeffs: &[f32]) -> Self {
        let taps = coeffs.len();
        assert!(
            taps >= 1 && BLOCK_SIZE + taps - 1 <= FAST_CONV_FFT_LEN,
            "filter of {taps} taps does not fit a {FAST_CONV_FFT_LEN}-point FFT"
        );

        let mut planner = FftPlanner::new();
        let mut fft = FftPair::new(&mut planner, FAST_CONV_FFT_LEN);

        // Impulse response h[d] = coeffs[L-1-d]
        let mut filter_spectrum = vec![Complex::new(0.0, 0.0); FAST_CONV_FFT_LEN];
        for (bin, &c) in filter_spectrum.iter_mut().zip(coeffs.iter().rev()) {
            *bin = Complex::new(c, 0.0);
        }
        fft.forward(&mut filter_spectrum);

        debug!(taps, fft_len = FAST_CONV_FFT_LEN, "fast convolver ready");

        Self {
            fft,
            filter_spectrum,
            frame: vec![Complex::new(0.0, 0.0); FAST_CONV_FFT_LEN],
            tail: vec![0.0; taps - 1],
        }
    }

    pub fn process(&mut self, input: &Block, out: &mut Block) {
        load_real(input, &mut self.frame[..BLOCK_SIZE]);
        self.frame[BLOCK_SIZE..].fill(Complex::new(0.0, 0.0));

        self.fft.forward(&mut self.frame);
        for (bin, h) in self.frame.iter_mut().zip(&self.filter_spectrum) {
            *bin *= *h;
        }
        self.fft.inverse(&mut self.frame);

        for (n, o) in out.iter_mut().enumerate() {
            *o = self.frame[n].re;
        }
        for (o, t) in out.iter_mut().zip(&self.tail) {
            *o += t;
        }

        let tail_len = self.tail.len();
        for (t, bin) in self
            .tail
            .iter_mut()
            .zip(&self.frame[BLOCK_SIZE..BLOCK_SIZE + tail_len])
        {
            *t = bin.re;
        }
    }
}

impl Default for FastConvolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::fir::FirFilter;
    use crate::dsp::oscillator::sine_block;

    #[test]
    fn test_matches_direct_fir_across_blocks() {
        // Asymmetric taps so coefficient order matters
        let coeffs: Vec<f32> = (0..FAST_CONV_TAPS)
            .map(|i| (i as f32 * 0.37).sin() * 0.05)
            .collect();
        let mut fast = FastConvolver::with_coeffs(&coeffs);
        let mut direct = FirFilter::new(coeffs, BLOCK_SIZE);

        let mut input = [0.0f32; BLOCK_SIZE];
        let mut fast_out = [0.0f32; BLOCK_SIZE];
        let mut direct_out = [0.0f32; BLOCK_SIZE];

        for k in 0..4 {
            sine_block(300.0 + 700.0 * k as f32, 0.1 * k as f32, SAMPLE_RATE as f32, &mut input);
            fast.process(&input, &mut fast_out);
            direct.process(&input, &mut direct_out);

            for (a, b) in fast_out.iter().zip(&direct_out) {
                assert!((a - b).abs() < 1e-4, "block {k}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_low_pass_attenuates_high_tone() {
        let mut conv = FastConvolver::new();
        let mut input = [0.0f32; BLOCK_SIZE];
        let mut out = [0.0f32; BLOCK_SIZE];

        sine_block(12_000.0, 0.0, SAMPLE_RATE as f32, &mut input);
        conv.process(&input, &mut out);
        conv.process(&input, &mut out);

        let peak = out.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak < 0.05, "12 kHz leaked through at {peak}");
    }
}
