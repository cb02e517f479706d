//! One-block benchmarks for each engine.
//!
//! The block size is fixed at build time, so there is a single size per
//! engine; compare against the 20ms block deadline.

mod effects;
mod modem;
mod radar;
mod spectral;

pub use effects::bench_effects;
pub use modem::bench_modem;
pub use radar::bench_radar;
pub use spectral::bench_spectral;

use blockfx::{Block, BLOCK_SIZE};

/// The shared test signal as a fixed block.
pub fn test_block() -> Block {
    let mut block = [0.0; BLOCK_SIZE];
    block.copy_from_slice(&crate::test_signal(BLOCK_SIZE));
    block
}
