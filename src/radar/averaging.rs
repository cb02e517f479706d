use tracing::debug;

use crate::config::{RADAR_AVERAGE_BLOCKS, RADAR_AVERAGE_CHIRP_GAIN};
use crate::dsp::block::Block;
use crate::io::{Report, ReportSink, StereoBlock};
use crate::radar::{chirp_template, transmit_block, Calibration, MatchedFilter};

/// Continuous ranger: a chirp every block, peaks averaged over
/// `RADAR_AVERAGE_BLOCKS` blocks.
///
/// Every microphone block is correlated without gating, so the peak of a
/// block holding no echo still counts towards the average.
pub struct AveragingRadar {
    filter: MatchedFilter,
    tx_block: Block,
    index_sum: u64,
    amplitude_sum: f32,
    remaining: u32,
    calibration: Calibration,
}

impl AveragingRadar {
    pub fn new() -> Self {
        let template = chirp_template(RADAR_AVERAGE_CHIRP_GAIN);
        debug!(window_blocks = RADAR_AVERAGE_BLOCKS, "averaging radar ready");

        Self {
            tx_block: transmit_block(&template),
            filter: MatchedFilter::new(template),
            index_sum: 0,
            amplitude_sum: 0.0,
            remaining: RADAR_AVERAGE_BLOCKS,
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
        out: &mut StereoBlock,
        reports: &mut dyn ReportSink,
    ) {
        let (lag, amplitude) = self.filter.peak(mic);
        self.index_sum += lag as u64;
        self.amplitude_sum += amplitude;

        self.remaining -= 1;
        if self.remaining == 0 {
            let blocks = RADAR_AVERAGE_BLOCKS as f32;
            let index = self.index_sum as f32 / blocks;
            let reading = self.calibration.reading(index, self.amplitude_sum / blocks);
            reports.report(Report::Range(reading));

            self.index_sum = 0;
            self.amplitude_sum = 0.0;
            self.remaining = RADAR_AVERAGE_BLOCKS;
        }

        if let Some(key) = key {
            self.calibration.handle_key(key, reports);
        }

        out.left.fill(0.0);
        out.right = self.tx_block;
    }
}

impl Default for AveragingRadar {
    fn default() -> Self {
        Self::new()
    }
}
