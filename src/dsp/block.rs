//! Fixed-size sample blocks and the vector helpers the engines share.

/*
Blocks
======

The driver hands over exactly BLOCK_SIZE samples per period and expects
exactly BLOCK_SIZE back per channel. Encoding that length in the type
(`[f32; BLOCK_SIZE]`) means no engine ever has to check a slice length at
runtime, and the compiler rejects a block of the wrong size outright.

The helpers below work on plain slices so they can also be used on the
longer scratch buffers (FFT frames, correlation output).
*/

use crate::config::BLOCK_SIZE;

/// One driver block.
pub type Block = [f32; BLOCK_SIZE];

/// An all-zero block, used for silent channels.
pub const SILENCE: Block = [0.0; BLOCK_SIZE];

/// `out = input * gain`
#[inline]
pub fn scale(input: &[f32], gain: f32, out: &mut [f32]) {
    for (o, &x) in out.iter_mut().zip(input) {
        *o = x * gain;
    }
}

/// `out = a ⊙ b`
#[inline]
pub fn multiply(a: &[f32], b: &[f32], out: &mut [f32]) {
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = x * y;
    }
}

/// `out = a + b`
#[inline]
pub fn add(a: &[f32], b: &[f32], out: &mut [f32]) {
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = x + y;
    }
}

/// Mean of absolute values. Zero for an empty slice.
pub fn mean_abs(x: &[f32]) -> f32 {
    if x.is_empty() {
        return 0.0;
    }
    x.iter().map(|v| v.abs()).sum::<f32>() / x.len() as f32
}

/// Index and value of the first strictly largest element.
///
/// Non-finite values never win. Returns `None` when nothing beats
/// negative infinity (empty or all-NaN input).
///
/// ```
/// use blockfx::dsp::block::argmax;
/// assert_eq!(argmax(&[0.1, 0.7, 0.7, 0.2]), Some((1, 0.7)));
/// assert_eq!(argmax(&[]), None);
/// ```
pub fn argmax(x: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in x.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        match best {
            Some((_, max)) if v <= max => {}
            _ => best = Some((i, v)),
        }
    }
    best
}
