//! Benchmarks for the QPSK modem.

use std::hint::black_box;

use blockfx::engine::StreamTime;
use blockfx::modem::QpskModem;
use blockfx::{Report, StereoBlock};
use criterion::Criterion;

use super::test_block;

pub fn bench_modem(c: &mut Criterion) {
    let mut group = c.benchmark_group("engines/modem");
    let mic = test_block();

    // Four candidate scores per block
    let mut modem = QpskModem::new();
    group.bench_function("decode", |b| b.iter(|| modem.decode(black_box(&mic))));

    // Transmit and receive active: re-request whenever the message ends
    let mut modem = QpskModem::new();
    let mut out = StereoBlock::silence();
    let mut reports: Vec<Report> = Vec::new();
    let mut block = 0u64;
    group.bench_function("transmit_receive", |b| {
        b.iter(|| {
            if !modem.is_transmitting() {
                modem.request_message();
            }
            let now = StreamTime::from_blocks(block);
            modem.process(black_box(&mic), now, black_box(&mut out), &mut reports);
            reports.clear();
            block += 1;
        })
    });

    group.finish();
}
