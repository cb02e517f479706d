//! Benchmarks for the block FIR filter.

use std::hint::black_box;

use blockfx::dsp::fir::{design_bandpass, design_lowpass, FirFilter};
use criterion::{BenchmarkId, Criterion};

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_fir(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/fir");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut out = vec![0.0f32; size];

        // Short low-pass (fast-convolution mode's filter, direct form)
        let mut short = FirFilter::new(design_lowpass(64, 4_000.0, 48_000.0), size);
        group.bench_with_input(BenchmarkId::new("lowpass_64", size), &size, |b, _| {
            b.iter(|| short.process(black_box(&input), black_box(&mut out)))
        });

        // Anti-alias band-pass of the spectral shifter
        let mut long = FirFilter::new(design_bandpass(257, 300.0, 18_000.0, 48_000.0), size);
        group.bench_with_input(BenchmarkId::new("bandpass_257", size), &size, |b, _| {
            b.iter(|| long.process(black_box(&input), black_box(&mut out)))
        });
    }

    group.finish();
}
