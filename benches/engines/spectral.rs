//! Benchmarks for the FFT-domain engines.

use std::hint::black_box;

use blockfx::engine::StreamTime;
use blockfx::spectral::{FastConvolver, FrequencyShifter};
use blockfx::{Report, StereoBlock, SILENCE};
use criterion::Criterion;

use super::test_block;

pub fn bench_spectral(c: &mut Criterion) {
    let mut group = c.benchmark_group("engines/spectral");
    let input = test_block();

    // Band-pass + window + FFT + shift + IFFT; report check included
    let mut shifter = FrequencyShifter::new();
    let mut out = StereoBlock::silence();
    let mut reports: Vec<Report> = Vec::new();
    let mut block = 0u64;
    group.bench_function("frequency_shift", |b| {
        b.iter(|| {
            let now = StreamTime::from_blocks(block);
            shifter.process(black_box(&input), now, black_box(&mut out), &mut reports);
            reports.clear();
            block += 1;
        })
    });

    let mut convolver = FastConvolver::new();
    let mut filtered = SILENCE;
    group.bench_function("fast_convolution", |b| {
        b.iter(|| convolver.process(black_box(&input), black_box(&mut filtered)))
    });

    group.finish();
}
