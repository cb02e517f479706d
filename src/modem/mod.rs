//! Minimal block-synchronous digital modem over the audio path.

pub mod qpsk;

pub use qpsk::{match_score, modulate, QpskModem, QpskSymbol};
