//! Benchmarks for the chirp rangers.

use std::hint::black_box;

use blockfx::radar::{chirp_template, AveragingRadar, MatchedFilter};
use blockfx::{Report, StereoBlock};
use criterion::Criterion;

use super::test_block;

pub fn bench_radar(c: &mut Criterion) {
    let mut group = c.benchmark_group("engines/radar");
    let mic = test_block();

    // The expensive step of a detection block
    let mut filter = MatchedFilter::new(chirp_template(1.0));
    group.bench_function("matched_filter", |b| {
        b.iter(|| filter.peak(black_box(&mic)))
    });

    // Correlates every block
    let mut radar = AveragingRadar::new();
    let mut out = StereoBlock::silence();
    let mut reports: Vec<Report> = Vec::new();
    group.bench_function("averaging", |b| {
        b.iter(|| {
            radar.process(black_box(&mic), None, black_box(&mut out), &mut reports);
            reports.clear();
        })
    });

    group.finish();
}
