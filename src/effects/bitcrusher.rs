//! Bit-crusher / amplitude quantizer
//!
//! Reduces the amplitude resolution of the signal to a handful of levels,
//! the classic lo-fi "crunch".
//!
//! # How It Works
//!
//! For a depth of `d` bits:
//!
//!   scaled    = x · 2^(d-1)
//!   quantized = round(scaled)
//!   output    = quantized / 2^(d-1)
//!
//! A full-scale signal in [-1, 1] therefore lands on `2^d + 1` levels.
//!
//! # Rounding
//!
//! Ties round half away from zero (`f32::round`): 0.5 → 1, -0.5 → -1. Every
//! quantized value is already an integer after scaling, so crushing twice
//! at the same depth changes nothing.
//!
//! # Depth Values
//!
//!   1 bit  = three levels {-1, 0, 1}, harsh
//!   3 bits = audible stepping
//!   5 bits = mild grit

use crate::config::{BITCRUSH_MAX_DEPTH, BITCRUSH_MIN_DEPTH};
use crate::dsp::block::Block;
use crate::effects::Effect;

/// Quantize one sample to `depth` bits.
#[inline]
pub fn crush(sample: f32, depth: u8) -> f32 {
    let steps = (1u32 << (depth - 1)) as f32;
    (sample * steps).round() / steps
}

/// Quantize a buffer in place.
pub fn crush_buffer(buffer: &mut [f32], depth: u8) {
    for sample in buffer.iter_mut() {
        *sample = crush(*sample, depth);
    }
}

pub struct Bitcrusher {
    depth: u8,
}

impl Bitcrusher {
    pub fn new() -> Self {
        Self {
            depth: BITCRUSH_MAX_DEPTH,
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// One bit finer, saturating at the maximum. Returns the new depth.
    pub fn increase(&mut self) -> u8 {
        if self.depth < BITCRUSH_MAX_DEPTH {
            self.depth += 1;
        }
        self.depth
    }

    /// One bit coarser, saturating at the minimum. Returns the new depth.
    pub fn decrease(&mut self) -> u8 {
        if self.depth > BITCRUSH_MIN_DEPTH {
            self.depth -= 1;
        }
        self.depth
    }
}

impl Default for Bitcrusher {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Bitcrusher {
    fn process(&mut self, input: &Block, out: &mut Block) {
        out.copy_from_slice(input);
        crush_buffer(out, self.depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_one_gives_three_levels() {
        let input = [0.3, -0.7, 0.05, 0.5, -0.5, 0.99, -1.0];
        let expected = [0.0, -1.0, 0.0, 1.0, -1.0, 1.0, -1.0];
        for (&x, &e) in input.iter().zip(&expected) {
            assert_eq!(crush(x, 1), e, "crush({x}, 1)");
        }
    }

    #[test]
    fn test_idempotent_at_every_depth() {
        let input: Vec<f32> = (0..200).map(|i| ((i as f32) * 0.173).sin() * 0.97).collect();
        for depth in BITCRUSH_MIN_DEPTH..=BITCRUSH_MAX_DEPTH {
            let mut once = input.clone();
            crush_buffer(&mut once, depth);
            let mut twice = once.clone();
            crush_buffer(&mut twice, depth);
            assert_eq!(once, twice, "depth {depth}");
        }
    }

    #[test]
    fn test_finer_depth_is_closer() {
        let x = 0.3337;
        let coarse = (crush(x, 2) - x).abs();
        let fine = (crush(x, 5) - x).abs();
        assert!(fine <= coarse);
        assert!(fine <= 1.0 / 32.0);
    }

    #[test]
    fn test_depth_saturates() {
        let mut crusher = Bitcrusher::new();
        assert_eq!(crusher.depth(), BITCRUSH_MAX_DEPTH);
        assert_eq!(crusher.increase(), BITCRUSH_MAX_DEPTH);

        for _ in 0..10 {
            crusher.decrease();
        }
        assert_eq!(crusher.depth(), BITCRUSH_MIN_DEPTH);
        assert_eq!(crusher.decrease(), BITCRUSH_MIN_DEPTH);
        assert_eq!(crusher.increase(), BITCRUSH_MIN_DEPTH + 1);
    }
}
