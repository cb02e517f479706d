//! Benchmarks for template correlation.

use std::hint::black_box;

use blockfx::dsp::correlate::{abs_in_place, correlate};
use criterion::{BenchmarkId, Criterion};

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_correlate(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/correlate");
    let template = test_signal(256);

    for &size in BLOCK_SIZES {
        let signal = test_signal(size);
        let mut out = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("template_256", size), &size, |b, _| {
            b.iter(|| {
                correlate(black_box(&signal), black_box(&template), &mut out);
                abs_in_place(black_box(&mut out));
            })
        });
    }

    group.finish();
}
