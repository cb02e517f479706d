//! Acoustic chirp ranging.

/*
Chirp Radar
===========

A short linear chirp is played through the speaker and the microphone
listens for its echo. Correlating the received block against the chirp
template (a matched filter) gives a sharp peak at the lag where the echo
sits:

    mic block:   ....~~~~/\/\/\/\~~~~.......
                         ^ lag (samples)

The lag converts to distance with the speed of sound:

    distance = (lag - zero_lag) · c / fs

The lag includes the fixed latency of the output and input path, so a
calibration step stores the lag measured with the target at the reference
position as `zero_lag`. The distance is the full acoustic path; it is not
halved for the round trip.

Two rangers share the matched filter:

  RadarRanger     one chirp every two seconds, correlates a single block a
                  fixed number of blocks after transmitting
  AveragingRadar  chirps every block and reports the mean peak over a
                  window of blocks, trading latency for stability
*/

pub mod averaging;
pub mod ranger;

pub use averaging::AveragingRadar;
pub use ranger::RadarRanger;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{
    RADAR_CHIRP_LEN, RADAR_CORR_LEN, RADAR_F_START_HZ, RADAR_F_STOP_HZ, RADAR_TX_OFFSET,
    SAMPLE_RATE, SPEED_OF_SOUND_M_S,
};
use crate::dsp::block::{argmax, Block, SILENCE};
use crate::dsp::correlate::{abs_in_place, correlate};
use crate::dsp::oscillator::linear_chirp;
use crate::io::{Report, ReportSink};

/// One ranging result.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeReading {
    /// Peak correlation lag in samples (averaged lags are fractional).
    pub index: f32,
    pub distance_m: f32,
    /// Correlation magnitude at the peak.
    pub amplitude: f32,
    pub zero_index: f32,
}

impl RangeReading {
    pub fn new(index: f32, amplitude: f32, zero_index: f32) -> Self {
        Self {
            index,
            distance_m: lag_to_distance(index, zero_index),
            amplitude,
            zero_index,
        }
    }
}

/// Acoustic path length for a correlation lag, relative to `zero_index`.
///
/// ```
/// use blockfx::radar::lag_to_distance;
/// assert_eq!(lag_to_distance(48.0, 0.0), 0.343);
/// ```
pub fn lag_to_distance(index: f32, zero_index: f32) -> f32 {
    (index - zero_index) * SPEED_OF_SOUND_M_S / SAMPLE_RATE as f32
}

/// Chirp template sweeping the configured band.
pub fn chirp_template(amplitude: f32) -> [f32; RADAR_CHIRP_LEN] {
    let mut template = [0.0; RADAR_CHIRP_LEN];
    linear_chirp(
        RADAR_F_START_HZ,
        RADAR_F_STOP_HZ,
        SAMPLE_RATE as f32,
        amplitude,
        &mut template,
    );
    template
}

/// The template zero-padded into a full transmit block.
pub fn transmit_block(template: &[f32; RADAR_CHIRP_LEN]) -> Block {
    let mut block = SILENCE;
    block[RADAR_TX_OFFSET..RADAR_TX_OFFSET + RADAR_CHIRP_LEN].copy_from_slice(template);
    block
}

/// Correlates microphone blocks against a fixed chirp template.
pub struct MatchedFilter {
    template: [f32; RADAR_CHIRP_LEN],
    correlation: Vec<f32>,
}

impl MatchedFilter {
    pub fn new(template: [f32; RADAR_CHIRP_LEN]) -> Self {
        Self {
            template,
            correlation: vec![0.0; RADAR_CORR_LEN],
        }
    }

    pub fn template(&self) -> &[f32; RADAR_CHIRP_LEN] {
        &self.template
    }

    /// Magnitude of the correlation from the last call to `peak`.
    pub fn correlation(&self) -> &[f32] {
        &self.correlation
    }

    /// Lag and magnitude of the strongest correlation. An all-zero
    /// correlation reports lag 0 with magnitude 0.
    pub fn peak(&mut self, mic: &Block) -> (usize, f32) {
        correlate(mic, &self.template, &mut self.correlation);
        abs_in_place(&mut self.correlation);
        argmax(&self.correlation).unwrap_or((0, 0.0))
    }
}

/// Zero-lag calibration shared by both rangers.
#[derive(Debug, Clone, Default)]
pub(crate) struct Calibration {
    zero_index: f32,
    last_index: Option<f32>,
}

impl Calibration {
    pub(crate) fn zero_index(&self) -> f32 {
        self.zero_index
    }

    pub(crate) fn reading(&mut self, index: f32, amplitude: f32) -> RangeReading {
        self.last_index = Some(index);
        RangeReading::new(index, amplitude, self.zero_index)
    }

    /// 'r' re-zeroes on the latest peak; any other key is invalid.
    pub(crate) fn handle_key(&mut self, key: char, reports: &mut dyn ReportSink) {
        if key != 'r' {
            reports.report(Report::InvalidKey(key));
            return;
        }
        match self.last_index {
            Some(index) => {
                self.zero_index = index;
                reports.report(Report::ZeroCalibrated { index });
            }
            None => reports.report(Report::CalibrationUnavailable),
        }
    }
}
