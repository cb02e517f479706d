use tracing::debug;

use crate::config::{RADAR_ECHO_DELAY_BLOCKS, RADAR_TX_PERIOD_MS};
use crate::dsp::block::Block;
use crate::engine::clock::{Interval, StreamTime};
use crate::io::{Report, ReportSink, StereoBlock};
use crate::radar::{chirp_template, transmit_block, Calibration, MatchedFilter};

/// Single-shot ranger: one chirp per transmit period, one correlation per
/// chirp.
///
/// Per block, in order:
///
/// 1. If an echo is pending, count down; on reaching zero, correlate this
///    microphone block and report the range.
/// 2. Apply the key ('r' re-zeroes on the latest peak).
/// 3. If the transmit timer is due, send the chirp on the right channel and
///    arm the echo countdown. Otherwise both channels are silent.
pub struct RadarRanger {
    filter: MatchedFilter,
    tx_block: Block,
    tx_timer: Interval,
    echo_countdown: Option<u32>,
    calibration: Calibration,
}

impl RadarRanger {
    pub fn new() -> Self {
        let template = chirp_template(1.0);
        debug!(
            period_ms = RADAR_TX_PERIOD_MS,
            echo_delay_blocks = RADAR_ECHO_DELAY_BLOCKS,
            "radar ranger ready"
        );

        Self {
            tx_block: transmit_block(&template),
            filter: MatchedFilter::new(template),
            tx_timer: Interval::starting_at(
                StreamTime::ZERO,
                StreamTime::from_millis(RADAR_TX_PERIOD_MS),
            ),
            echo_countdown: None,
            calibration: Calibration::default(),
        }
    }

    pub fn zero_index(&self) -> f32 {
        self.calibration.zero_index()
    }

    pub fn transmit_block(&self) -> &Block {
        &self.tx_block
    }

    pub fn process(
        &mut self,
        mic: &Block,
        key: Option<char>,
        now: StreamTime,
        out: &mut StereoBlock,
        reports: &mut dyn ReportSink,
    ) {
        if let Some(remaining) = self.echo_countdown {
            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                self.echo_countdown = None;
                let (lag, amplitude) = self.filter.peak(mic);
                let reading = self.calibration.reading(lag as f32, amplitude);
                reports.report(Report::Range(reading));
            } else {
                self.echo_countdown = Some(remaining);
            }
        }

        if let Some(key) = key {
            self.calibration.handle_key(key, reports);
        }

        out.left.fill(0.0);
        if self.tx_timer.poll(now) {
            out.right = self.tx_block;
            self.echo_countdown = Some(RADAR_ECHO_DELAY_BLOCKS);
        } else {
            out.right.fill(0.0);
        }
    }
}

impl Default for RadarRanger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SAMPLE_RATE, SPEED_OF_SOUND_M_S};
    use crate::dsp::block::SILENCE;
    use crate::engine::clock::StreamClock;
    use crate::radar::tests::{echo_block, XorShift};
    use crate::radar::RangeReading;

    fn ranges(reports: &[Report]) -> Vec<RangeReading> {
        reports
            .iter()
            .filter_map(|r| match r {
                Report::Range(reading) => Some(*reading),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_transmits_on_period_and_detects_after_delay() {
        let mut radar = RadarRanger::new();
        let mut clock = StreamClock::new();
        let mut out = StereoBlock::silence();
        let mut reports: Vec<Report> = Vec::new();
        let mut tx_blocks = Vec::new();

        for block in 0..201 {
            radar.process(&SILENCE, None, clock.now(), &mut out, &mut reports);
            if out.right != SILENCE {
                assert_eq!(&out.right, radar.transmit_block());
                tx_blocks.push(block);
            }
            assert_eq!(out.left, SILENCE);
            clock.advance();
        }

        // 2 s period = 100 blocks
        assert_eq!(tx_blocks, vec![0, 100, 200]);
        assert_eq!(ranges(&reports).len(), 2);
    }

    #[test]
    fn test_echo_offset_to_distance() {
        let mut radar = RadarRanger::new();
        let mut clock = StreamClock::new();
        let mut out = StereoBlock::silence();
        let mut reports: Vec<Report> = Vec::new();
        let mut noise = XorShift(0xdead_beef);
        let template = *radar.filter.template();

        let offset = 120;
        let echo = echo_block(&template, offset, &mut noise);

        for block in 0..4 {
            let mic = if block == RADAR_ECHO_DELAY_BLOCKS { echo } else { SILENCE };
            radar.process(&mic, None, clock.now(), &mut out, &mut reports);
            clock.advance();
        }

        let readings = ranges(&reports);
        assert_eq!(readings.len(), 1);
        let reading = readings[0];
        assert!((reading.index - offset as f32).abs() <= 1.0);
        let expected = reading.index * SPEED_OF_SOUND_M_S / SAMPLE_RATE as f32;
        assert!((reading.distance_m - expected).abs() < 1e-6);
        assert_eq!(reading.zero_index, 0.0);
    }

    #[test]
    fn test_recalibration_zeroes_distance() {
        let mut radar = RadarRanger::new();
        let mut clock = StreamClock::new();
        let mut out = StereoBlock::silence();
        let mut reports: Vec<Report> = Vec::new();
        let mut noise = XorShift(7);
        let template = *radar.filter.template();
        let echo = echo_block(&template, 64, &mut noise);

        for block in 0..104u32 {
            let mic = if block % 100 == RADAR_ECHO_DELAY_BLOCKS { echo } else { SILENCE };
            let key = (block == RADAR_ECHO_DELAY_BLOCKS).then_some('r');
            radar.process(&mic, key, clock.now(), &mut out, &mut reports);
            clock.advance();
        }

        let readings = ranges(&reports);
        assert_eq!(readings.len(), 2);
        assert_eq!(radar.zero_index(), readings[0].index);
        assert!(reports.contains(&Report::ZeroCalibrated { index: readings[0].index }));
        assert_eq!(readings[1].zero_index, readings[0].index);
        assert_eq!(readings[1].distance_m, 0.0);
    }
}
