//! Benchmarks for the time-domain effects and their dispatcher.

use std::hint::black_box;

use blockfx::effects::{Bitcrusher, Effect, Flanger, ModeDispatcher, RingModulator};
use blockfx::{BlockInput, Report, StereoBlock, SILENCE};
use criterion::Criterion;

use super::test_block;

pub fn bench_effects(c: &mut Criterion) {
    let mut group = c.benchmark_group("engines/effects");
    let input = test_block();
    let mut out = SILENCE;

    // Full 256-tap FIR per block plus the tap move
    let mut flanger = Flanger::new();
    group.bench_function("flanger", |b| {
        b.iter(|| flanger.process(black_box(&input), black_box(&mut out)))
    });

    let mut ring_mod = RingModulator::new();
    group.bench_function("ring_mod", |b| {
        b.iter(|| ring_mod.process(black_box(&input), black_box(&mut out)))
    });

    let mut crusher = Bitcrusher::new();
    group.bench_function("bitcrush", |b| {
        b.iter(|| crusher.process(black_box(&input), black_box(&mut out)))
    });

    // Dispatch overhead on top of the flanger
    let mut dispatcher = ModeDispatcher::new();
    let mut stereo = StereoBlock::silence();
    let mut reports: Vec<Report> = Vec::new();
    dispatcher.handle_key('f', &mut reports);
    group.bench_function("dispatcher_flanger", |b| {
        b.iter(|| {
            let block = BlockInput::new(&input, &input);
            dispatcher.process(black_box(&block), black_box(&mut stereo), &mut reports);
        })
    });

    group.finish();
}
