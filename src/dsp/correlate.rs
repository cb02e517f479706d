//! Cross-correlation against a known template.

/*
Matched Filtering
=================

To find where a known template sits inside a received block, slide the
template along the block and take the dot product at every lag:

    c[lag] = Σ template[k] · signal[lag + k]     k = 0 .. R-1

The lag where |c| peaks is the template's offset. Only non-negative lags are
computed (an echo cannot arrive before it was sent); near the end of the
block the template runs off the edge and the sum covers just the overlap.

Cost is O(C · R) multiply-adds per block, roughly 245k for the radar's
960 × 256, far inside one block period.
*/

/// Correlate `template` against `signal` for lags `0 .. out.len()`.
pub fn correlate(signal: &[f32], template: &[f32], out: &mut [f32]) {
    for (lag, c) in out.iter_mut().enumerate() {
        let overlap = signal.len().saturating_sub(lag).min(template.len());
        if overlap == 0 {
            *c = 0.0;
            continue;
        }
        *c = signal[lag..lag + overlap]
            .iter()
            .zip(&template[..overlap])
            .map(|(&s, &t)| s * t)
            .sum();
    }
}

/// Replace every value with its magnitude.
#[inline]
pub fn abs_in_place(values: &mut [f32]) {
    for v in values.iter_mut() {
        *v = v.abs();
    }
}
