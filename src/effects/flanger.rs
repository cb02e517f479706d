use crate::config::{BLOCK_SIZE, FLANGER_TAPS, FLANGER_TAP_GAIN};
use crate::dsp::block::Block;
use crate::dsp::fir::FirFilter;
use crate::effects::Effect;

/*
Flanger as a Time-Varying FIR
=============================

A flanger is a delay whose length sweeps slowly back and forth. Here the
delay is expressed as an FIR filter with a single nonzero tap: the tap's
position IS the delay.

    coeffs:  [0 0 0 ... 0 0.5 0 ... 0]
                          ^ tap index i  →  delay of L-1-i samples

(coefficients are time-reversed, see `dsp::fir`).

Once per block the tap moves exactly one slot:

    sweeping down:  i = L-2, L-3, ..., 1, 0   then reverse
    sweeping up:    i = 0, 1, ..., L-3, L-2   then reverse

so the delay changes by one sample period per block, between 1 and L-1
samples. At 48 kHz with 960-sample blocks and L = 256 one full sweep takes
about 10 seconds.

Keeping the full coefficient vector is wasteful (L-1 zero multiplies per
output sample), but it keeps the effect a plain FIR and the sweep state a
single index.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    Down,
    Up,
}

pub struct Flanger {
    fir: FirFilter,
    tap: usize,
    direction: SweepDirection,
}

impl Flanger {
    /// Highest tap index the sweep reaches (shortest delay, one sample).
    pub const MAX_TAP: usize = FLANGER_TAPS - 2;

    pub fn new() -> Self {
        let mut coeffs = vec![0.0; FLANGER_TAPS];
        coeffs[Self::MAX_TAP] = FLANGER_TAP_GAIN;

        Self {
            fir: FirFilter::new(coeffs, BLOCK_SIZE),
            tap: Self::MAX_TAP,
            direction: SweepDirection::Down,
        }
    }

    pub fn tap(&self) -> usize {
        self.tap
    }

    pub fn direction(&self) -> SweepDirection {
        self.direction
    }

    /// Current delay of the moving tap, in samples.
    pub fn delay_samples(&self) -> usize {
        FLANGER_TAPS - 1 - self.tap
    }

    pub fn coeffs(&self) -> &[f32] {
        self.fir.coeffs()
    }

    fn advance_tap(&mut self) {
        self.fir.coeffs_mut()[self.tap] = 0.0;

        match self.direction {
            SweepDirection::Down => {
                self.tap -= 1;
                if self.tap == 0 {
                    self.direction = SweepDirection::Up;
                }
            }
            SweepDirection::Up => {
                self.tap += 1;
                if self.tap >= Self::MAX_TAP {
                    self.direction = SweepDirection::Down;
                }
            }
        }

        self.fir.coeffs_mut()[self.tap] = FLANGER_TAP_GAIN;
    }
}

impl Default for Flanger {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Flanger {
    fn process(&mut self, input: &Block, out: &mut Block) {
        self.fir.process(input, out);
        self.advance_tap();
    }
}
