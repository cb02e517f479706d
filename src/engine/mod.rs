// Purpose - top-level program switch: owns the active engine and the stream
// clock, and routes each driver block to it

pub mod clock;
pub mod latch;
pub mod monitor;

pub use clock::{Interval, StreamClock, StreamTime};
pub use latch::EventLatch;
pub use monitor::Monitor;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::effects::ModeDispatcher;
use crate::io::{BlockInput, Report, ReportSink, StereoBlock};
use crate::modem::QpskModem;
use crate::radar::{AveragingRadar, RadarRanger};
use crate::spectral::{FastConvolver, FrequencyShifter};

/// Which program runs for the lifetime of the engine.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SystemMode {
    /// Generator on the left, microphone on the right.
    Passthrough,
    /// Flanger, ring modulator and bit-crusher, switched by key.
    #[default]
    Effects,
    /// FFT frequency shifter with peak reports.
    SpectralShift,
    /// QPSK message transmitter and block detector.
    Qpsk,
    /// Single-shot chirp ranging.
    Radar,
    /// Continuous chirp ranging, averaged.
    RadarAverage,
    /// Key and button echo, silent outputs.
    Monitor,
    /// Overlap-add FFT low-pass on the generator.
    FastConvolution,
}

impl SystemMode {
    pub fn label(self) -> &'static str {
        match self {
            SystemMode::Passthrough => "passthrough",
            SystemMode::Effects => "effects",
            SystemMode::SpectralShift => "spectral shift",
            SystemMode::Qpsk => "QPSK modem",
            SystemMode::Radar => "radar",
            SystemMode::RadarAverage => "averaging radar",
            SystemMode::Monitor => "monitor",
            SystemMode::FastConvolution => "fast convolution",
        }
    }

    /// Key and button help for the mode.
    pub fn usage(self) -> &'static str {
        match self {
            SystemMode::Passthrough => "Left: generator, right: microphone. No controls.",
            SystemMode::Effects => {
                "Keys: n none, f flanger, r ring modulator, b bit-crusher, +/- bit depth. \
                 Button: switch microphone / generator."
            }
            SystemMode::SpectralShift => {
                "Left: microphone, right: shifted microphone. Peak frequency reported every second."
            }
            SystemMode::Qpsk => "Button: transmit the test message and enable the receiver.",
            SystemMode::Radar | SystemMode::RadarAverage => {
                "Chirp on the right channel. Key: r sets the current distance to zero."
            }
            SystemMode::Monitor => {
                "Keys: n, f, r, b are echoed, +/- move a counter. Button presses are reported."
            }
            SystemMode::FastConvolution => {
                "Left: microphone, right: generator through a 4 kHz low-pass."
            }
        }
    }
}

enum Program {
    Passthrough,
    Effects(Box<ModeDispatcher>),
    SpectralShift(Box<FrequencyShifter>),
    Qpsk(Box<QpskModem>),
    Radar(Box<RadarRanger>),
    RadarAverage(Box<AveragingRadar>),
    Monitor(Monitor),
    FastConvolution(Box<FastConvolver>),
}

impl Program {
    fn new(mode: SystemMode) -> Self {
        match mode {
            SystemMode::Passthrough => Program::Passthrough,
            SystemMode::Effects => Program::Effects(Box::default()),
            SystemMode::SpectralShift => Program::SpectralShift(Box::default()),
            SystemMode::Qpsk => Program::Qpsk(Box::default()),
            SystemMode::Radar => Program::Radar(Box::default()),
            SystemMode::RadarAverage => Program::RadarAverage(Box::default()),
            SystemMode::Monitor => Program::Monitor(Monitor::new()),
            SystemMode::FastConvolution => Program::FastConvolution(Box::default()),
        }
    }
}

/// Block-synchronous engine for one system mode.
///
/// Construction allocates every buffer the mode needs; `process_block`
/// never allocates.
pub struct Engine {
    mode: SystemMode,
    program: Program,
    clock: StreamClock,
}

impl Engine {
    pub fn new(mode: SystemMode) -> Self {
        info!(mode = mode.label(), "engine ready");
        Self {
            mode,
            program: Program::new(mode),
            clock: StreamClock::new(),
        }
    }

    pub fn mode(&self) -> SystemMode {
        self.mode
    }

    /// Start time of the next block.
    pub fn now(&self) -> StreamTime {
        self.clock.now()
    }

    /// Process one driver block. Both output channels are written in full.
    pub fn process_block(
        &mut self,
        input: &BlockInput<'_>,
        out: &mut StereoBlock,
        reports: &mut dyn ReportSink,
    ) {
        let now = self.clock.now();

        match &mut self.program {
            Program::Passthrough => {
                reject_key(input, reports);
                out.left = *input.generator;
                out.right = *input.mic;
            }
            Program::Effects(dispatcher) => dispatcher.process(input, out, reports),
            Program::SpectralShift(shifter) => {
                reject_key(input, reports);
                shifter.process(input.mic, now, out, reports);
            }
            Program::Qpsk(modem) => {
                reject_key(input, reports);
                if input.button {
                    modem.request_message();
                }
                modem.process(input.mic, now, out, reports);
            }
            Program::Radar(radar) => radar.process(input.mic, input.key, now, out, reports),
            Program::RadarAverage(radar) => radar.process(input.mic, input.key, out, reports),
            Program::Monitor(monitor) => monitor.process(input, out, reports),
            Program::FastConvolution(convolver) => {
                reject_key(input, reports);
                out.left = *input.mic;
                convolver.process(input.generator, &mut out.right);
            }
        }

        self.clock.advance();
    }
}

/// Modes without key commands report every key as invalid.
fn reject_key(input: &BlockInput<'_>, reports: &mut dyn ReportSink) {
    if let Some(key) = input.key {
        reports.report(Report::InvalidKey(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BLOCK_SIZE;
    use crate::dsp::block::SILENCE;

    #[test]
    fn test_passthrough_routes_sources() {
        let mut engine = Engine::new(SystemMode::Passthrough);
        let mic = [0.1; BLOCK_SIZE];
        let generator = [0.9; BLOCK_SIZE];
        let mut out = StereoBlock::silence();
        let mut reports: Vec<Report> = Vec::new();

        engine.process_block(&BlockInput::new(&mic, &generator), &mut out, &mut reports);
        assert_eq!(out.left, generator);
        assert_eq!(out.right, mic);
        assert_eq!(engine.now(), StreamTime::from_blocks(1));
    }

    #[test]
    fn test_keys_rejected_where_unused() {
        let mut engine = Engine::new(SystemMode::FastConvolution);
        let mut out = StereoBlock::silence();
        let mut reports: Vec<Report> = Vec::new();
        let input = BlockInput::new(&SILENCE, &SILENCE).with_key('f');
        engine.process_block(&input, &mut out, &mut reports);
        assert_eq!(reports, vec![Report::InvalidKey('f')]);
    }

    #[test]
    fn test_qpsk_button_starts_transmission() {
        let mut engine = Engine::new(SystemMode::Qpsk);
        let mut out = StereoBlock::silence();
        let mut reports: Vec<Report> = Vec::new();

        let input = BlockInput::new(&SILENCE, &SILENCE).with_button();
        engine.process_block(&input, &mut out, &mut reports);
        assert_eq!(reports[..2], [Report::TransmitRequested, Report::ReceiverEnabled]);
        assert_ne!(out.left, SILENCE);
    }

    #[test]
    fn test_mode_labels_are_distinct() {
        use clap::ValueEnum;
        let labels: std::collections::HashSet<_> =
            SystemMode::value_variants().iter().map(|m| m.label()).collect();
        assert_eq!(labels.len(), SystemMode::value_variants().len());
    }
}
