use crate::effects::{Bitcrusher, Effect, EffectMode, Flanger, RingModulator};
use crate::io::{BlockInput, InputSource, Report, ReportSink, StereoBlock};

/*
Effect Mode Dispatcher
======================

One dispatcher sits between the driver and the three effects. Per block:

    1. button edge  → toggle microphone / generator
    2. key          → decode into a KeyCommand and apply it
    3. route the selected source through the active effect
    4. write the result to both output channels

Every effect owns its own state and keeps running only while selected; a
flanger left mid-sweep resumes from the same tap when switched back to.

Keys
----

    n  no effect          +  bit-crusher one bit finer
    f  flanger            -  bit-crusher one bit coarser
    r  ring modulator
    b  bit-crusher

Depth keys act even while another effect is active, so the depth can be
set up before switching to the crusher. Anything else is reported as an
invalid key and changes nothing.
*/

/// A decoded effects-mode keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Select(EffectMode),
    DepthUp,
    DepthDown,
}

impl KeyCommand {
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'n' => Some(KeyCommand::Select(EffectMode::None)),
            'f' => Some(KeyCommand::Select(EffectMode::Flanger)),
            'r' => Some(KeyCommand::Select(EffectMode::RingMod)),
            'b' => Some(KeyCommand::Select(EffectMode::Bitcrush)),
            '+' => Some(KeyCommand::DepthUp),
            '-' => Some(KeyCommand::DepthDown),
            _ => None,
        }
    }
}

pub struct ModeDispatcher {
    mode: EffectMode,
    source: InputSource,
    flanger: Flanger,
    ring_mod: RingModulator,
    bitcrusher: Bitcrusher,
}

impl ModeDispatcher {
    pub fn new() -> Self {
        Self {
            mode: EffectMode::None,
            source: InputSource::Microphone,
            flanger: Flanger::new(),
            ring_mod: RingModulator::new(),
            bitcrusher: Bitcrusher::new(),
        }
    }

    pub fn mode(&self) -> EffectMode {
        self.mode
    }

    pub fn source(&self) -> InputSource {
        self.source
    }

    pub fn bit_depth(&self) -> u8 {
        self.bitcrusher.depth()
    }

    pub fn flanger(&self) -> &Flanger {
        &self.flanger
    }

    pub fn ring_mod(&self) -> &RingModulator {
        &self.ring_mod
    }

    /// Apply one keypress. Unknown keys are reported and ignored.
    pub fn handle_key(&mut self, key: char, reports: &mut dyn ReportSink) {
        match KeyCommand::from_key(key) {
            Some(KeyCommand::Select(mode)) => {
                self.mode = mode;
                reports.report(Report::EffectSelected(mode));
            }
            Some(KeyCommand::DepthUp) => {
                let depth = self.bitcrusher.increase();
                reports.report(Report::BitDepth(depth));
            }
            Some(KeyCommand::DepthDown) => {
                let depth = self.bitcrusher.decrease();
                reports.report(Report::BitDepth(depth));
            }
            None => reports.report(Report::InvalidKey(key)),
        }
    }

    pub fn toggle_source(&mut self, reports: &mut dyn ReportSink) {
        self.source = self.source.toggled();
        reports.report(Report::SourceSelected(self.source));
    }

    pub fn process(
        &mut self,
        input: &BlockInput<'_>,
        out: &mut StereoBlock,
        reports: &mut dyn ReportSink,
    ) {
        if input.button {
            self.toggle_source(reports);
        }
        if let Some(key) = input.key {
            self.handle_key(key, reports);
        }

        let block = input.source(self.source);
        match self.mode {
            EffectMode::None => out.left.copy_from_slice(block),
            EffectMode::Flanger => self.flanger.process(block, &mut out.left),
            EffectMode::RingMod => self.ring_mod.process(block, &mut out.left),
            EffectMode::Bitcrush => self.bitcrusher.process(block, &mut out.left),
        }
        out.right = out.left;
    }
}

impl Default for ModeDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
