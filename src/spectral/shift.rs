use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use tracing::debug;

use crate::config::{
    ANTI_ALIAS_LOW_CUTOFF_HZ, ANTI_ALIAS_REL_CUTOFF_PERMILLE, ANTI_ALIAS_TAPS, BLOCK_SIZE,
    FREQ_SHIFT_BINS, SAMPLE_RATE, SPECTRUM_REPORT_INTERVAL_MS,
};
use crate::dsp::block::{argmax, multiply, Block, SILENCE};
use crate::dsp::fir::{design_bandpass, FirFilter};
use crate::dsp::spectrum::{
    bin_frequency, load_real, mirror_hermitian, power, shift_up, store_real, FftPair,
};
use crate::dsp::window;
use crate::engine::clock::{Interval, StreamTime};
use crate::io::{Report, ReportSink, StereoBlock};

/*
FFT Frequency Shifter
=====================

Moves every component of the input up by a fixed frequency, SHIFT bins of
fs / N each (5 · 50 Hz = 250 Hz with the default configuration). Unlike a
pitch shifter this is a linear shift, so harmonic relationships are broken
and voices turn metallic.

Per block:

    input ─► band-pass ─► × Blackman ─► FFT ─► shift K bins ─► mirror ─► IFFT ─► right
      │                                   │
      └─────────────────────────────────► left (untouched copy)
                                          └─► peak detector (once per second)

Why the band-pass
-----------------

  - The low edge strips the microphone's DC bias, which would otherwise be
    shifted up into an audible K-bin tone.
  - The high edge keeps the top of the spectrum empty. Shifting pushes
    content up by K bins; anything within K bins of Nyquist would be
    pushed past it and wrap around as aliasing. Hence the build-time rule

        K / N < 1 - relative_cutoff

Shifting in the FFT domain
--------------------------

Only bins 0 ..= N/2 carry information for a real signal. They are moved up
by K, the lowest K bins are cleared (the old DC is dropped with them), and
the upper half is rebuilt as the complex conjugate mirror so the inverse
FFT comes out real.

The block edges are not overlapped, so the Blackman taper is audible as a
20 ms amplitude ripple. That is the price of a one-FFT-per-block design.
*/

/// Block-wise FFT frequency shifter, moving the spectrum up by `SHIFT` bins.
pub struct SpectralShift<const SHIFT: usize> {
    anti_alias: FirFilter,
    window: Block,
    fft: FftPair,
    spectrum: Vec<Complex<f32>>,
    shifted: Vec<Complex<f32>>,
    power: Vec<f32>,
    filtered: Block,
    windowed: Block,
    report: Interval,
}

/// The shifter at the configured shift.
pub type FrequencyShifter = SpectralShift<FREQ_SHIFT_BINS>;

impl<const SHIFT: usize> SpectralShift<SHIFT> {
    /// Shift in Hz for this block size and sample rate.
    pub const SHIFT_HZ: f32 = SHIFT as f32 * SAMPLE_RATE as f32 / BLOCK_SIZE as f32;

    pub fn new() -> Self {
        const {
            assert!(
                SHIFT * 1000 < BLOCK_SIZE * (1000 - ANTI_ALIAS_REL_CUTOFF_PERMILLE),
                "shift would alias past the anti-alias cut-off"
            )
        };

        let nyquist = 0.5 * SAMPLE_RATE as f32;
        let high_hz = nyquist * ANTI_ALIAS_REL_CUTOFF_PERMILLE as f32 / 1000.0;
        let coeffs = design_bandpass(
            ANTI_ALIAS_TAPS,
            ANTI_ALIAS_LOW_CUTOFF_HZ,
            high_hz,
            SAMPLE_RATE as f32,
        );

        let mut win = SILENCE;
        window::blackman(&mut win);

        let mut planner = FftPlanner::new();
        let fft = FftPair::new(&mut planner, BLOCK_SIZE);

        debug!(
            shift_bins = SHIFT,
            shift_hz = Self::SHIFT_HZ,
            band_low_hz = ANTI_ALIAS_LOW_CUTOFF_HZ,
            band_high_hz = high_hz,
            "spectral shifter ready"
        );

        Self {
            anti_alias: FirFilter::new(coeffs, BLOCK_SIZE),
            window: win,
            fft,
            spectrum: vec![Complex::new(0.0, 0.0); BLOCK_SIZE],
            shifted: vec![Complex::new(0.0, 0.0); BLOCK_SIZE],
            power: vec![0.0; BLOCK_SIZE / 2 + 1],
            filtered: SILENCE,
            windowed: SILENCE,
            report: Interval::starting_at(
                StreamTime::ZERO,
                StreamTime::from_millis(SPECTRUM_REPORT_INTERVAL_MS),
            ),
        }
    }

    /// Filter, window and shift `input`. Left gets the untouched input,
    /// right the shifted signal. A peak-frequency report is emitted when
    /// the report interval has elapsed at `now`.
    pub fn process(
        &mut self,
        input: &Block,
        now: StreamTime,
        out: &mut StereoBlock,
        reports: &mut dyn ReportSink,
    ) {
        out.left.copy_from_slice(input);

        self.anti_alias.process(input, &mut self.filtered);
        multiply(&self.filtered, &self.window, &mut self.windowed);

        load_real(&self.windowed, &mut self.spectrum);
        self.fft.forward(&mut self.spectrum);

        if self.report.poll(now) {
            if let Some((hz, amplitude)) = self.peak() {
                reports.report(Report::PeakFrequency { hz, amplitude });
            }
        }

        self.shift_spectrum(&mut out.right);
    }

    /// Shift an already windowed block, skipping the band-pass.
    #[cfg(test)]
    fn shift_windowed(&mut self, windowed: &Block, out: &mut Block) {
        load_real(windowed, &mut self.spectrum);
        self.fft.forward(&mut self.spectrum);
        self.shift_spectrum(out);
    }

    /// Strongest non-redundant bin of the current spectrum, as
    /// (frequency in Hz, magnitude).
    fn peak(&mut self) -> Option<(f32, f32)> {
        power(&self.spectrum[..=BLOCK_SIZE / 2], &mut self.power);
        argmax(&self.power).map(|(bin, p)| {
            (
                bin_frequency(bin, BLOCK_SIZE, SAMPLE_RATE as f32),
                p.sqrt(),
            )
        })
    }

    fn shift_spectrum(&mut self, out: &mut Block) {
        shift_up(&self.spectrum, &mut self.shifted, SHIFT);
        mirror_hermitian(&mut self.shifted);
        self.fft.inverse(&mut self.shifted);
        store_real(&self.shifted, out);
    }
}

impl<const SHIFT: usize> Default for SpectralShift<SHIFT> {
    fn default() -> Self {
        Self::new()
    }
}
