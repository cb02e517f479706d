//! Tone, reference and chirp generators.

/*
Oscillators
===========

Three kinds of generated signal show up in the engines:

  running tone     A phase-continuous sine whose frequency may change between
                   blocks (the ring modulator carrier, the synthetic source).
                   The phase accumulator carries over, so retuning never
                   produces a click.

  reference block  A sine/cosine starting at a fixed phase, computed once.
                   The QPSK modem uses these as its I/Q carriers; because a
                   block holds a whole number of carrier cycles, every block
                   starts at the same phase and one table is enough.

  chirp            A linear frequency sweep from f0 to f1 over a fixed number
                   of samples, used as the ranging probe:

                     f(t)   = f0 + (f1 - f0) · t / T
                     phi(t) = 2π (f0 t + (f1 - f0) t² / (2T))

                   Its sharp autocorrelation peak is what lets a matched
                   filter locate the echo to within a sample.
*/

use std::f32::consts::TAU;

/// Phase-continuous sine generator.
pub struct SineGenerator {
    phase: f32,
    frequency: f32,
    sample_rate: f32,
}

impl SineGenerator {
    pub fn new(frequency: f32, sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            frequency,
            sample_rate,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Retune; takes effect from the next rendered sample.
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
    }

    pub fn render(&mut self, out: &mut [f32]) {
        let phase_inc = TAU * self.frequency / self.sample_rate;
        for sample in out.iter_mut() {
            *sample = self.phase.sin();
            self.phase += phase_inc;
            if self.phase >= TAU {
                self.phase -= TAU;
            }
        }
    }
}

/// `out[n] = sin(2π f n / fs + phase)`
pub fn sine_block(frequency: f32, phase: f32, sample_rate: f32, out: &mut [f32]) {
    for (n, sample) in out.iter_mut().enumerate() {
        *sample = (TAU * frequency * n as f32 / sample_rate + phase).sin();
    }
}

/// `out[n] = cos(2π f n / fs + phase)`
pub fn cosine_block(frequency: f32, phase: f32, sample_rate: f32, out: &mut [f32]) {
    for (n, sample) in out.iter_mut().enumerate() {
        *sample = (TAU * frequency * n as f32 / sample_rate + phase).cos();
    }
}

/// Linear chirp from `f_start` to `f_stop` across `out.len()` samples.
pub fn linear_chirp(f_start: f32, f_stop: f32, sample_rate: f32, amplitude: f32, out: &mut [f32]) {
    let duration = out.len() as f32 / sample_rate;
    let sweep_rate = (f_stop - f_start) / duration;
    for (n, sample) in out.iter_mut().enumerate() {
        let t = n as f32 / sample_rate;
        let phase = TAU * (f_start * t + 0.5 * sweep_rate * t * t);
        *sample = amplitude * phase.sin();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_generator_matches_reference() {
        let mut osc = SineGenerator::new(1_000.0, 48_000.0);
        let mut rendered = [0.0f32; 48];
        osc.render(&mut rendered);

        let mut reference = [0.0f32; 48];
        sine_block(1_000.0, 0.0, 48_000.0, &mut reference);

        for (a, b) in rendered.iter().zip(&reference) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_retune_keeps_phase_continuous() {
        let mut osc = SineGenerator::new(500.0, 48_000.0);
        let mut first = [0.0f32; 100];
        osc.render(&mut first);

        osc.set_frequency(600.0);
        let mut second = [0.0f32; 1];
        osc.render(&mut second);

        // The step across the boundary is no bigger than one sample's worth
        // of slope at the new frequency
        let max_step = TAU * 600.0 / 48_000.0;
        assert!((second[0] - first[99]).abs() <= max_step + 1e-4);
    }

    #[test]
    fn test_sine_cosine_quadrature() {
        let mut s = [0.0f32; 96];
        let mut c = [0.0f32; 96];
        sine_block(500.0, 0.0, 48_000.0, &mut s);
        cosine_block(500.0, 0.0, 48_000.0, &mut c);

        // One full cycle: the pair is orthogonal
        let dot: f32 = s.iter().zip(&c).map(|(a, b)| a * b).sum();
        assert!(dot.abs() < 1e-3);
    }

    #[test]
    fn test_chirp_amplitude_bounded() {
        let mut chirp = [0.0f32; 256];
        linear_chirp(2_000.0, 8_000.0, 48_000.0, 0.5, &mut chirp);
        assert!(chirp.iter().all(|s| s.abs() <= 0.5 + 1e-6));
        assert!(chirp.iter().any(|s| s.abs() > 0.4));
    }
}
