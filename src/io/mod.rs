// Purpose - the engine's boundary with the driver: block inputs/outputs and
// diagnostic reports

pub mod report;

pub use report::{Report, ReportSink, Severity};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::block::{Block, SILENCE};

/// Which source feeds single-input modes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSource {
    #[default]
    Microphone,
    Generator,
}

impl InputSource {
    pub fn toggled(self) -> Self {
        match self {
            InputSource::Microphone => InputSource::Generator,
            InputSource::Generator => InputSource::Microphone,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputSource::Microphone => "microphone",
            InputSource::Generator => "waveform generator",
        }
    }
}

/// Everything the driver delivers for one block period.
///
/// At most one key and one button edge per block; the driver latches
/// anything that arrives in between.
#[derive(Clone, Copy)]
pub struct BlockInput<'a> {
    pub mic: &'a Block,
    pub generator: &'a Block,
    pub key: Option<char>,
    pub button: bool,
}

impl<'a> BlockInput<'a> {
    pub fn new(mic: &'a Block, generator: &'a Block) -> Self {
        Self {
            mic,
            generator,
            key: None,
            button: false,
        }
    }

    pub fn with_key(mut self, key: char) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_button(mut self) -> Self {
        self.button = true;
        self
    }

    pub fn source(&self, source: InputSource) -> &'a Block {
        match source {
            InputSource::Microphone => self.mic,
            InputSource::Generator => self.generator,
        }
    }
}

/// Left and right output blocks, written in full every period.
#[derive(Clone)]
pub struct StereoBlock {
    pub left: Block,
    pub right: Block,
}

impl StereoBlock {
    pub fn silence() -> Self {
        Self {
            left: SILENCE,
            right: SILENCE,
        }
    }

    pub fn fill_silence(&mut self) {
        self.left.fill(0.0);
        self.right.fill(0.0);
    }
}

impl Default for StereoBlock {
    fn default() -> Self {
        Self::silence()
    }
}
