//! Window functions.

use std::f32::consts::TAU;

/// Fill `out` with a symmetric Blackman window.
///
/// `w[n] = 0.42 - 0.5 cos(2πn / (N-1)) + 0.08 cos(4πn / (N-1))`
pub fn blackman(out: &mut [f32]) {
    let len = out.len();
    if len <= 1 {
        out.fill(1.0);
        return;
    }
    let denom = (len - 1) as f32;
    for (n, w) in out.iter_mut().enumerate() {
        let phase = TAU * n as f32 / denom;
        *w = 0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos();
    }
}
