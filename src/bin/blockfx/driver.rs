//! Adapts cpal's variable-size callbacks to the engine's fixed blocks.

use rtrb::{Consumer, Producer};

use blockfx::{
    config::SAMPLE_RATE,
    dsp::oscillator::SineGenerator,
    engine::EventLatch,
    Block, BlockInput, Engine, Report, StereoBlock, BLOCK_SIZE, SILENCE,
};

/// Every n-th output frame goes to the scope
pub const SCOPE_DECIMATION: usize = 4;

/// Runs inside the output callback
///
/// Output frames are served from the last rendered block; when it runs out,
/// the next block is rendered from whatever the input side has delivered.
/// Missing microphone samples (start-up, input underrun) read as silence.
pub struct BlockDriver {
    engine: Engine,
    generator: SineGenerator,
    mic: Block,
    tone: Block,
    out: StereoBlock,
    /// Next frame of `out` to play
    position: usize,
    mic_rx: Consumer<f32>,
    key_rx: Consumer<char>,
    button: EventLatch,
    reports: Producer<Report>,
    scope_tx: Producer<[f32; 2]>,
}

pub struct DriverChannels {
    pub mic_rx: Consumer<f32>,
    pub key_rx: Consumer<char>,
    pub button: EventLatch,
    pub reports: Producer<Report>,
    pub scope_tx: Producer<[f32; 2]>,
}

impl BlockDriver {
    pub fn new(engine: Engine, tone_hz: f32, channels: DriverChannels) -> Self {
        Self {
            engine,
            generator: SineGenerator::new(tone_hz, SAMPLE_RATE as f32),
            mic: SILENCE,
            tone: SILENCE,
            out: StereoBlock::silence(),
            position: BLOCK_SIZE,
            mic_rx: channels.mic_rx,
            key_rx: channels.key_rx,
            button: channels.button,
            reports: channels.reports,
            scope_tx: channels.scope_tx,
        }
    }

    /// Fill an interleaved output buffer. Channels past the second are
    /// silent.
    pub fn fill(&mut self, data: &mut [f32], channels: usize) {
        for frame in data.chunks_mut(channels) {
            if self.position == BLOCK_SIZE {
                self.render_block();
                self.position = 0;
            }

            let left = self.out.left[self.position];
            let right = self.out.right[self.position];
            for (ch, sample) in frame.iter_mut().enumerate() {
                *sample = match ch {
                    0 => left,
                    1 => right,
                    _ => 0.0,
                };
            }

            if self.position % SCOPE_DECIMATION == 0 {
                let _ = self.scope_tx.push([left, right]);
            }
            self.position += 1;
        }
    }

    fn render_block(&mut self) {
        if self.mic_rx.slots() >= BLOCK_SIZE {
            for sample in self.mic.iter_mut() {
                *sample = self.mic_rx.pop().unwrap_or(0.0);
            }
        } else {
            self.mic.fill(0.0);
        }
        self.generator.render(&mut self.tone);

        let mut input = BlockInput::new(&self.mic, &self.tone);
        input.key = self.key_rx.pop().ok();
        input.button = self.button.take();

        self.engine
            .process_block(&input, &mut self.out, &mut self.reports);
    }
}
