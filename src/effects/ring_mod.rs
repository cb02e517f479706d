use crate::config::{
    BLOCK_SIZE, RING_MOD_CARRIER_CENTER_HZ, RING_MOD_CARRIER_DELTA_HZ, RING_MOD_CARRIER_WIDTH_HZ,
    SAMPLE_RATE,
};
use crate::dsp::block::{multiply, Block};
use crate::dsp::oscillator::SineGenerator;
use crate::effects::flanger::SweepDirection;
use crate::effects::Effect;

/*
Ring Modulation
===============

Multiply the input by a sine carrier:

    out(t) = in(t) · sin(2π fc t)

Each input component at f becomes a pair at f - fc and f + fc (f itself
disappears), giving the metallic, bell-like character.

The carrier itself sweeps linearly between centre - width/2 and
centre + width/2, one fixed step per block:

    delta = 2 · width · N / (sweep_time · fs)

so a full up-and-down cycle takes sweep_time seconds. When the next step
would leave the range, the direction flips and the step goes the other way
instead, keeping the carrier inside the bounds at all times.
*/

pub struct RingModulator {
    carrier: SineGenerator,
    frequency: f32,
    direction: SweepDirection,
    reference: Block,
}

impl RingModulator {
    pub const MIN_CARRIER_HZ: f32 = RING_MOD_CARRIER_CENTER_HZ - 0.5 * RING_MOD_CARRIER_WIDTH_HZ;
    pub const MAX_CARRIER_HZ: f32 = RING_MOD_CARRIER_CENTER_HZ + 0.5 * RING_MOD_CARRIER_WIDTH_HZ;

    pub fn new() -> Self {
        Self {
            carrier: SineGenerator::new(RING_MOD_CARRIER_CENTER_HZ, SAMPLE_RATE as f32),
            frequency: RING_MOD_CARRIER_CENTER_HZ,
            direction: SweepDirection::Down,
            reference: [0.0; BLOCK_SIZE],
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn direction(&self) -> SweepDirection {
        self.direction
    }

    fn step_carrier(&mut self) {
        let up = self.frequency + RING_MOD_CARRIER_DELTA_HZ;
        let down = self.frequency - RING_MOD_CARRIER_DELTA_HZ;

        self.frequency = match self.direction {
            SweepDirection::Up if up > Self::MAX_CARRIER_HZ => {
                self.direction = SweepDirection::Down;
                down
            }
            SweepDirection::Up => up,
            SweepDirection::Down if down < Self::MIN_CARRIER_HZ => {
                self.direction = SweepDirection::Up;
                up
            }
            SweepDirection::Down => down,
        };

        self.carrier.set_frequency(self.frequency);
    }
}

impl Default for RingModulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for RingModulator {
    fn process(&mut self, input: &Block, out: &mut Block) {
        self.carrier.render(&mut self.reference);
        multiply(input, &self.reference, out);
        self.step_carrier();
    }
}
