//! FFT plans and spectrum manipulation helpers.

/*
Spectra of Real Signals
=======================

The FFT of N real samples is N complex bins, but only N/2 + 1 of them carry
information. The rest are mirror images (Hermitian symmetry):

    X[N - k] = conj(X[k])

Bin k corresponds to the frequency k · fs / N, so with fs = 48 kHz and
N = 960 each bin is 50 Hz wide.

Any manipulation that should still produce a REAL time signal has to keep
that symmetry. The pattern used here: edit only the lower half
(bins 0 ..= N/2), then rebuild the upper half from it with `mirror_hermitian`
before the inverse transform.


Shifting Up
-----------

Moving every bin up by K positions moves every frequency up by K · fs / N:

    before:  [X0 X1 X2 X3 X4 X5 ... | mirror ]
    K = 2:   [ 0  0  0 X1 X2 X3 ... | mirror ]

The bins that open up at the bottom are cleared. The source's DC term would
land on bin K, and is dropped as well (a frequency shifter has nothing
sensible to do with an offset). Whatever was in the top K bins below Nyquist
falls off the end, which is why the input must be band-limited first.


Normalisation
-------------

rustfft computes unnormalised transforms: forward then inverse scales by N.
`FftPair::inverse` divides by N so a round trip returns the input.
*/

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Forward and inverse plans for one length, sharing a scratch buffer.
pub struct FftPair {
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    len: usize,
}

impl FftPair {
    pub fn new(planner: &mut FftPlanner<f32>, len: usize) -> Self {
        let forward = planner.plan_fft_forward(len);
        let inverse = planner.plan_fft_inverse(len);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());

        Self {
            forward,
            inverse,
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// In-place forward transform (unnormalised).
    pub fn forward(&mut self, buffer: &mut [Complex<f32>]) {
        self.forward.process_with_scratch(buffer, &mut self.scratch);
    }

    /// In-place inverse transform, scaled by 1/N.
    pub fn inverse(&mut self, buffer: &mut [Complex<f32>]) {
        self.inverse.process_with_scratch(buffer, &mut self.scratch);
        let scale = 1.0 / self.len as f32;
        for bin in buffer.iter_mut() {
            *bin *= scale;
        }
    }
}

/// Load a real block into a complex buffer with zero imaginary part.
pub fn load_real(input: &[f32], buffer: &mut [Complex<f32>]) {
    for (bin, &x) in buffer.iter_mut().zip(input) {
        *bin = Complex::new(x, 0.0);
    }
}

/// Copy the real parts of `buffer` into `out`.
pub fn store_real(buffer: &[Complex<f32>], out: &mut [f32]) {
    for (o, bin) in out.iter_mut().zip(buffer) {
        *o = bin.re;
    }
}

/// Shift the non-redundant half of `spectrum` up by `bins` into `shifted`.
///
/// Only bins `0 ..= N/2` of `shifted` are written; call [`mirror_hermitian`]
/// afterwards to fill the upper half.
pub fn shift_up(spectrum: &[Complex<f32>], shifted: &mut [Complex<f32>], bins: usize) {
    let half = spectrum.len() / 2;
    let zero = Complex::new(0.0, 0.0);
    for (k, bin) in shifted[..=half].iter_mut().enumerate() {
        *bin = match k.checked_sub(bins) {
            // Source DC lands here; drop it
            Some(0) if bins > 0 => zero,
            Some(src) => spectrum[src],
            None => zero,
        };
    }
}

/// Rebuild `X[N-k] = conj(X[k])` from the lower half.
pub fn mirror_hermitian(spectrum: &mut [Complex<f32>]) {
    let n = spectrum.len();
    if n == 0 {
        return;
    }
    spectrum[0].im = 0.0;
    for k in 1..(n + 1) / 2 {
        spectrum[n - k] = spectrum[k].conj();
    }
    if n % 2 == 0 {
        spectrum[n / 2].im = 0.0;
    }
}

/// `out[k] = |X[k]|²`
pub fn power(spectrum: &[Complex<f32>], out: &mut [f32]) {
    for (p, bin) in out.iter_mut().zip(spectrum) {
        *p = bin.norm_sqr();
    }
}

/// Centre frequency of bin `k` for an `fft_len`-point transform.
///
/// ```
/// use blockfx::dsp::spectrum::bin_frequency;
/// assert_eq!(bin_frequency(5, 960, 48_000.0), 250.0);
/// ```
#[inline]
pub fn bin_frequency(k: usize, fft_len: usize, sample_rate: f32) -> f32 {
    k as f32 * sample_rate / fft_len as f32
}
