// Purpose - single-input block effects and the keypress-driven dispatcher
// that switches between them

pub mod bitcrusher;
pub mod dispatcher;
pub mod flanger;
pub mod ring_mod;

pub use bitcrusher::Bitcrusher;
pub use dispatcher::{KeyCommand, ModeDispatcher};
pub use flanger::{Flanger, SweepDirection};
pub use ring_mod::RingModulator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::block::Block;

/// Core trait for block effects
///
/// One call per block period. Implementations keep whatever state they need
/// between calls and must not allocate inside `process`.
pub trait Effect: Send {
    fn process(&mut self, input: &Block, out: &mut Block);
}

/// Which effect the dispatcher routes blocks through.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectMode {
    /// Input copied straight to the output.
    #[default]
    None,
    Flanger,
    RingMod,
    Bitcrush,
}

impl EffectMode {
    pub fn label(self) -> &'static str {
        match self {
            EffectMode::None => "no effect",
            EffectMode::Flanger => "flanger",
            EffectMode::RingMod => "ring modulator",
            EffectMode::Bitcrush => "bit-crusher",
        }
    }
}
