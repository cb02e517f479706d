//! Line-oriented diagnostics emitted by the engines.
//!
//! Reports are small `Copy` values so the audio callback can hand them off
//! without touching the heap. Formatting into text happens on the consumer
//! side through `Display`.

use std::fmt;

#[cfg(feature = "rtrb")]
use rtrb::Producer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::effects::EffectMode;
use crate::io::InputSource;
use crate::modem::QpskSymbol;
use crate::radar::RangeReading;

/// How loudly a consumer should log a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Report {
    /// Button press switched the effect input.
    SourceSelected(InputSource),
    /// Key selected a new effect.
    EffectSelected(EffectMode),
    /// Bit-crusher depth after a '+'/'-' (reported even when saturated).
    BitDepth(u8),
    /// Key with no meaning in the current mode; state unchanged.
    InvalidKey(char),
    /// Strongest bin of the pre-shift spectrum.
    PeakFrequency { hz: f32, amplitude: f32 },
    /// New QPSK message requested.
    TransmitRequested,
    ReceiverEnabled,
    ReceiverDisabled,
    /// Symbol classified from one received block.
    Decoded(QpskSymbol),
    /// Receiver could not score any candidate (non-finite input).
    DecodeError,
    /// Single-shot or averaged ranging result.
    Range(RangeReading),
    /// Zero distance moved to this correlation index.
    ZeroCalibrated { index: f32 },
    /// Recalibration asked for before any echo was measured.
    CalibrationUnavailable,
    /// Monitor mode: a recognised key was pressed.
    KeyPressed(char),
    /// Monitor mode: counter value after '+'/'-'.
    Counter(i32),
    /// Monitor mode: button edge.
    ButtonPressed,
}

impl Report {
    pub fn severity(&self) -> Severity {
        match self {
            Report::InvalidKey(_) | Report::CalibrationUnavailable => Severity::Warn,
            Report::DecodeError => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::SourceSelected(source) => write!(f, "Input source: {}", source.label()),
            Report::EffectSelected(mode) => write!(f, "Effect: {}", mode.label()),
            Report::BitDepth(depth) => write!(f, "Bit-crusher depth: {depth} bits"),
            Report::InvalidKey(key) => write!(f, "Invalid key pressed: {key:?}"),
            Report::PeakFrequency { hz, amplitude } => {
                write!(f, "Peak frequency at {hz:.1} Hz with amplitude {amplitude:.4}")
            }
            Report::TransmitRequested => write!(f, "Transmitting QPSK message"),
            Report::ReceiverEnabled => write!(f, "Receiver enabled"),
            Report::ReceiverDisabled => write!(f, "Receiver disabled"),
            Report::Decoded(symbol) => write!(f, "Rx: {} ({})", symbol.index(), symbol.bits()),
            Report::DecodeError => write!(f, "Rx: ERR"),
            Report::Range(reading) => write!(
                f,
                "{:.1}, distance = {:.3} m, amplitude = {:.4}, zero index = {:.1}",
                reading.index, reading.distance_m, reading.amplitude, reading.zero_index
            ),
            Report::ZeroCalibrated { index } => {
                write!(f, "Setting distance to zero at index {index:.1}")
            }
            Report::CalibrationUnavailable => write!(f, "No echo measured yet, nothing to zero"),
            Report::KeyPressed(key) => write!(f, "Key {key} pressed"),
            Report::Counter(count) => write!(f, "Counter: {count}"),
            Report::ButtonPressed => write!(f, "User button was pressed"),
        }
    }
}

/// Destination for reports produced inside the block callback.
pub trait ReportSink {
    fn report(&mut self, report: Report);
}

impl ReportSink for Vec<Report> {
    fn report(&mut self, report: Report) {
        self.push(report);
    }
}

/// Drops the report when the ring is full; the audio thread never waits.
#[cfg(feature = "rtrb")]
impl ReportSink for Producer<Report> {
    fn report(&mut self, report: Report) {
        let _ = self.push(report);
    }
}
