//! Benchmarks for the forward/inverse FFT pair.

use std::hint::black_box;

use blockfx::dsp::spectrum::{load_real, mirror_hermitian, shift_up, FftPair};
use criterion::{BenchmarkId, Criterion};
use rustfft::{num_complex::Complex, FftPlanner};

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/fft");
    let mut planner = FftPlanner::new();

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut fft = FftPair::new(&mut planner, size);
        let mut buffer = vec![Complex::new(0.0, 0.0); size];
        let mut shifted = vec![Complex::new(0.0, 0.0); size];

        group.bench_with_input(BenchmarkId::new("round_trip", size), &size, |b, _| {
            b.iter(|| {
                load_real(black_box(&input), &mut buffer);
                fft.forward(&mut buffer);
                fft.inverse(black_box(&mut buffer));
            })
        });

        group.bench_with_input(BenchmarkId::new("shift_5_bins", size), &size, |b, _| {
            b.iter(|| {
                load_real(black_box(&input), &mut buffer);
                fft.forward(&mut buffer);
                shift_up(&buffer, &mut shifted, 5);
                mirror_hermitian(&mut shifted);
                fft.inverse(black_box(&mut shifted));
            })
        });
    }

    group.finish();
}
