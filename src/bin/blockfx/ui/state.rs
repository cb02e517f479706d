//! Engine state as seen from the UI thread
//!
//! The audio thread never shares its state; the UI reconstructs what it
//! needs from the reports it receives.

use std::collections::VecDeque;

use blockfx::{
    config::BITCRUSH_MAX_DEPTH, effects::EffectMode, radar::RangeReading, InputSource, Report,
    Severity, SystemMode,
};

/// Report lines kept for the log panel
const LOG_CAPACITY: usize = 200;

pub struct UiState {
    pub mode: SystemMode,
    pub source: InputSource,
    pub effect: EffectMode,
    pub bit_depth: u8,
    /// (frequency Hz, amplitude) of the last spectrum report
    pub peak: Option<(f32, f32)>,
    pub range: Option<RangeReading>,
    pub receiving: bool,
    pub counter: i32,
    pub log: VecDeque<(Severity, String)>,
}

impl UiState {
    pub fn new(mode: SystemMode) -> Self {
        Self {
            mode,
            source: InputSource::Microphone,
            effect: EffectMode::None,
            bit_depth: BITCRUSH_MAX_DEPTH,
            peak: None,
            range: None,
            receiving: false,
            counter: 0,
            log: VecDeque::with_capacity(LOG_CAPACITY),
        }
    }

    pub fn apply(&mut self, report: Report) {
        match report {
            Report::SourceSelected(source) => self.source = source,
            Report::EffectSelected(effect) => self.effect = effect,
            Report::BitDepth(depth) => self.bit_depth = depth,
            Report::PeakFrequency { hz, amplitude } => self.peak = Some((hz, amplitude)),
            Report::Range(reading) => self.range = Some(reading),
            Report::ReceiverEnabled => self.receiving = true,
            Report::ReceiverDisabled => self.receiving = false,
            Report::Counter(count) => self.counter = count,
            _ => {}
        }

        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back((report.severity(), report.to_string()));
    }

    /// Mode-specific summary for the status bar
    pub fn summary(&self) -> String {
        match self.mode {
            SystemMode::Effects => format!(
                "{} | source: {} | depth: {} bits",
                self.effect.label(),
                self.source.label(),
                self.bit_depth
            ),
            SystemMode::SpectralShift => match self.peak {
                Some((hz, amplitude)) => format!("peak {hz:.0} Hz ({amplitude:.2})"),
                None => "waiting for spectrum".to_string(),
            },
            SystemMode::Qpsk => {
                if self.receiving {
                    "receiver on".to_string()
                } else {
                    "idle".to_string()
                }
            }
            SystemMode::Radar | SystemMode::RadarAverage => match self.range {
                Some(r) => format!(
                    "{:.3} m (index {:.1}, zero {:.1})",
                    r.distance_m, r.index, r.zero_index
                ),
                None => "no echo yet".to_string(),
            },
            SystemMode::Monitor => format!("counter: {}", self.counter),
            SystemMode::Passthrough | SystemMode::FastConvolution => String::new(),
        }
    }
}
