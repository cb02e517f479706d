//! Block FIR filtering and windowed-sinc design.

/*
Block FIR Filter
================

An FIR filter is a weighted sum over the most recent L input samples:

    y[n] = Σ h[d] · x[n - d]        d = 0 .. L-1

Processing a whole block at a time, the filter keeps a history buffer of
length L + N - 1:

    history:  [ previous L-1 samples | current block (N samples) ]
               ^ 0                     ^ L-1

Output sample n is the dot product of the coefficients with the window
history[n .. n + L]. After the block, the last L-1 samples slide down to the
front of the buffer, ready for the next call. Nothing is allocated after
construction.

Coefficient Order
-----------------

Coefficients are stored TIME-REVERSED, the way block FIR routines in most
embedded numerics libraries expect them:

    coeffs[i]  multiplies  x[n - (L-1-i)]

so coeffs[L-1] is the zero-delay tap and coeffs[0] the oldest. Symmetric
(linear-phase) designs look the same either way; the distinction only
matters for the flanger, whose moving tap index maps to a delay of
L-1-index samples.


Windowed-Sinc Design
--------------------

An ideal low-pass has an infinitely long sinc impulse response. Truncating it
to L taps and tapering the ends with a window (Blackman here) gives a
practical linear-phase filter:

    h[n] = sinc(2 fc (n - M)) · w[n],   M = (L-1)/2

normalised to unity gain at DC. A band-pass is the difference of two such
low-passes: everything below `high` minus everything below `low`. Because
both are normalised to exactly 1 at DC, the difference has (numerically)
zero DC gain, which is what strips a constant microphone bias.
*/

use std::f32::consts::PI;

use crate::dsp::window;

/// FIR filter with a preallocated history, processing up to `max_block`
/// samples per call.
pub struct FirFilter {
    coeffs: Vec<f32>,
    history: Vec<f32>,
    max_block: usize,
}

impl FirFilter {
    /// Create a filter from time-reversed coefficients.
    pub fn new(coeffs: Vec<f32>, max_block: usize) -> Self {
        assert!(!coeffs.is_empty(), "FIR filter needs at least one tap");
        let history = vec![0.0; coeffs.len() + max_block - 1];
        Self {
            coeffs,
            history,
            max_block,
        }
    }

    pub fn coeffs(&self) -> &[f32] {
        &self.coeffs
    }

    /// Mutable access to the coefficients, for time-varying filters.
    pub fn coeffs_mut(&mut self) -> &mut [f32] {
        &mut self.coeffs
    }

    /// Filter `input` into `out`. Both must have the same length, at most
    /// `max_block`.
    pub fn process(&mut self, input: &[f32], out: &mut [f32]) {
        let n = input.len();
        debug_assert!(n <= self.max_block);
        debug_assert_eq!(n, out.len());

        let taps = self.coeffs.len();
        self.history[taps - 1..taps - 1 + n].copy_from_slice(input);

        for (i, o) in out.iter_mut().enumerate() {
            let window = &self.history[i..i + taps];
            *o = window
                .iter()
                .zip(&self.coeffs)
                .map(|(&x, &h)| x * h)
                .sum();
        }

        // Slide the newest L-1 samples to the front
        self.history.copy_within(n..n + taps - 1, 0);
    }
}

/// Blackman-windowed sinc low-pass, unity gain at DC.
pub fn design_lowpass(taps: usize, cutoff_hz: f32, sample_rate: f32) -> Vec<f32> {
    let fc = cutoff_hz / sample_rate;
    let centre = (taps as f32 - 1.0) / 2.0;

    let mut h = vec![0.0; taps];
    window::blackman(&mut h);
    for (n, tap) in h.iter_mut().enumerate() {
        let t = n as f32 - centre;
        let sinc = if t == 0.0 {
            2.0 * fc
        } else {
            (2.0 * PI * fc * t).sin() / (PI * t)
        };
        *tap *= sinc;
    }

    let dc_gain: f32 = h.iter().sum();
    for tap in h.iter_mut() {
        *tap /= dc_gain;
    }
    h
}

/// Band-pass as the difference of two windowed-sinc low-passes.
pub fn design_bandpass(taps: usize, low_hz: f32, high_hz: f32, sample_rate: f32) -> Vec<f32> {
    let upper = design_lowpass(taps, high_hz, sample_rate);
    let lower = design_lowpass(taps, low_hz, sample_rate);
    upper.iter().zip(&lower).map(|(u, l)| u - l).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_response_matches_time_reversed_taps() {
        // coeffs[L-1] is zero delay, so the impulse response is the
        // coefficient vector read backwards
        let coeffs = vec![0.1, 0.2, 0.3, 0.4];
        let mut fir = FirFilter::new(coeffs.clone(), 8);

        let mut input = [0.0f32; 8];
        input[0] = 1.0;
        let mut out = [0.0f32; 8];
        fir.process(&input, &mut out);

        assert_eq!(&out[..4], &[0.4, 0.3, 0.2, 0.1]);
        assert!(out[4..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_history_carries_across_blocks() {
        // Pure 2-sample delay, fed in blocks of 3
        let mut fir = FirFilter::new(vec![1.0, 0.0, 0.0], 3);
        let mut out = [0.0f32; 3];

        fir.process(&[1.0, 2.0, 3.0], &mut out);
        assert_eq!(out, [0.0, 0.0, 1.0]);

        fir.process(&[4.0, 5.0, 6.0], &mut out);
        assert_eq!(out, [2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_lowpass_unity_dc() {
        let h = design_lowpass(63, 2_000.0, 48_000.0);
        let dc: f32 = h.iter().sum();
        assert!((dc - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_bandpass_blocks_dc() {
        let h = design_bandpass(257, 300.0, 18_000.0, 48_000.0);
        let mut fir = FirFilter::new(h, 512);
        let input = [0.8f32; 512];
        let mut out = [0.0f32; 512];

        // After the history fills, a constant input should vanish
        fir.process(&input, &mut out);
        fir.process(&input, &mut out);
        assert!(out.iter().all(|s| s.abs() < 1e-3), "DC leaked: {}", out[511]);
    }
}
