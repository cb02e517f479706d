use std::f32::consts::FRAC_1_SQRT_2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{QPSK_CARRIER_HZ, QPSK_MESSAGE_LEN, QPSK_RX_LATENCY_BLOCKS, SAMPLE_RATE};
use crate::dsp::block::{add, argmax, mean_abs, Block, SILENCE};
use crate::dsp::oscillator::{cosine_block, sine_block};
use crate::engine::clock::StreamTime;
use crate::engine::latch::EventLatch;
use crate::io::{Report, ReportSink, StereoBlock};

/*
Block QPSK Modem
================

Each block carries one symbol: two bits encoded as the signs of an
in-phase (cosine) and a quadrature (sine) component of a fixed carrier.

    out = i · √½ · cos(2π fc t) + q · √½ · sin(2π fc t)

The carrier is chosen so a block holds a whole number of cycles, so every
block starts at phase zero and the two reference blocks are computed once.

Grey-coded constellation (adjacent quadrants differ in one bit):

             Q
             ^
        11   |   01
             |
      -------+------->  I
             |
        10   |   00

Transmit
--------

A message request (button) is latched from any thread. At the next block
boundary the latch is read-and-cleared; if the transmitter is idle the
message cursor restarts at symbol 0 and the receive window is armed. One
symbol goes out per block until the message ends, then the output is
silent again.

The receive window is exactly one message long. It opens
QPSK_RX_LATENCY_BLOCKS after the request, when the first symbol comes back
through the audio path:

    block      0    1    2   ...   M    M+1
    tx        s0   s1   s2        --
    rx        --   s0   s1       s(M-1) disabled

Receive
-------

While the window is open every microphone block is compared against all
four candidate symbol blocks. The score is

    mean |candidate + received|

which is largest when the received block is in phase with the candidate
(constructive sum) and smallest when it is in anti-phase. The best-scoring
candidate is reported.

There is no symbol timing, carrier or phase recovery: the classifier only
works when the received blocks line up with the transmitted ones, as in a
direct loopback.
*/

/// One two-bit QPSK symbol. The discriminant is the bit pattern.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QpskSymbol {
    S00 = 0b00,
    S01 = 0b01,
    S10 = 0b10,
    S11 = 0b11,
}

impl QpskSymbol {
    pub const ALL: [QpskSymbol; 4] = [
        QpskSymbol::S00,
        QpskSymbol::S01,
        QpskSymbol::S10,
        QpskSymbol::S11,
    ];

    /// Symbol with the two low bits of `value`.
    pub fn from_bits(value: usize) -> Self {
        Self::ALL[value & 0b11]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn bits(self) -> &'static str {
        match self {
            QpskSymbol::S00 => "00",
            QpskSymbol::S01 => "01",
            QpskSymbol::S10 => "10",
            QpskSymbol::S11 => "11",
        }
    }

    /// (in-phase, quadrature) signs.
    pub fn signs(self) -> (f32, f32) {
        match self {
            QpskSymbol::S00 => (1.0, -1.0),
            QpskSymbol::S01 => (1.0, 1.0),
            QpskSymbol::S11 => (-1.0, 1.0),
            QpskSymbol::S10 => (-1.0, -1.0),
        }
    }
}

/// Synthesize one symbol block from the carrier references.
pub fn modulate(symbol: QpskSymbol, cos_ref: &Block, sin_ref: &Block, out: &mut Block) {
    let (i, q) = symbol.signs();
    let (gi, gq) = (i * FRAC_1_SQRT_2, q * FRAC_1_SQRT_2);
    for ((o, &c), &s) in out.iter_mut().zip(cos_ref).zip(sin_ref) {
        *o = gi * c + gq * s;
    }
}

/// Score of `candidate` against `received`: mean |candidate + received|.
/// `sum` is scratch space for the sample-wise sum.
pub fn match_score(candidate: &Block, received: &Block, sum: &mut Block) -> f32 {
    add(candidate, received, sum);
    mean_abs(sum)
}

/// The fixed test message: symbols 0, 1, 2, 3 repeating.
pub fn test_message() -> [QpskSymbol; QPSK_MESSAGE_LEN] {
    std::array::from_fn(QpskSymbol::from_bits)
}

pub struct QpskModem {
    message: [QpskSymbol; QPSK_MESSAGE_LEN],
    cos_ref: Block,
    sin_ref: Block,
    candidates: [Block; 4],
    /// Next symbol to send; `None` while idle.
    cursor: Option<usize>,
    /// Open receive window; `None` while disabled.
    rx_window: Option<RxWindow>,
    requests: EventLatch,
    sum: Block,
}

/// Decoding runs for `opens <= now < closes`.
#[derive(Debug, Clone, Copy)]
struct RxWindow {
    opens: StreamTime,
    closes: StreamTime,
}

impl QpskModem {
    pub fn new() -> Self {
        let mut cos_ref = SILENCE;
        let mut sin_ref = SILENCE;
        cosine_block(QPSK_CARRIER_HZ as f32, 0.0, SAMPLE_RATE as f32, &mut cos_ref);
        sine_block(QPSK_CARRIER_HZ as f32, 0.0, SAMPLE_RATE as f32, &mut sin_ref);

        let mut candidates = [SILENCE; 4];
        for (symbol, candidate) in QpskSymbol::ALL.iter().zip(candidates.iter_mut()) {
            modulate(*symbol, &cos_ref, &sin_ref, candidate);
        }

        debug!(
            carrier_hz = QPSK_CARRIER_HZ,
            symbols = QPSK_MESSAGE_LEN,
            "QPSK modem ready"
        );

        Self {
            message: test_message(),
            cos_ref,
            sin_ref,
            candidates,
            cursor: None,
            rx_window: None,
            requests: EventLatch::new(),
            sum: SILENCE,
        }
    }

    pub fn request_message(&self) {
        self.requests.trigger();
    }

    pub fn message(&self) -> &[QpskSymbol; QPSK_MESSAGE_LEN] {
        &self.message
    }

    pub fn is_transmitting(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn is_receiving(&self) -> bool {
        self.rx_window.is_some()
    }

    /// Nearest candidate to `received`, or `None` if no score is finite.
    pub fn decode(&mut self, received: &Block) -> Option<QpskSymbol> {
        let mut scores = [0.0f32; 4];
        for (score, candidate) in scores.iter_mut().zip(&self.candidates) {
            *score = match_score(candidate, received, &mut self.sum);
        }
        argmax(&scores).map(|(best, _)| QpskSymbol::ALL[best])
    }

    /// Transmit on left, silence on right, and decode `mic` while the
    /// receive window is open.
    pub fn process(
        &mut self,
        mic: &Block,
        now: StreamTime,
        out: &mut StereoBlock,
        reports: &mut dyn ReportSink,
    ) {
        if self.requests.take() {
            reports.report(Report::TransmitRequested);
            if self.cursor.is_none() {
                self.cursor = Some(0);
                let opens = now + StreamTime::from_blocks(QPSK_RX_LATENCY_BLOCKS as u64);
                self.rx_window = Some(RxWindow {
                    opens,
                    closes: opens + StreamTime::from_blocks(QPSK_MESSAGE_LEN as u64),
                });
                reports.report(Report::ReceiverEnabled);
            }
        }

        match self.cursor {
            Some(idx) => {
                modulate(self.message[idx], &self.cos_ref, &self.sin_ref, &mut out.left);
                self.cursor = (idx + 1 < QPSK_MESSAGE_LEN).then_some(idx + 1);
            }
            None => out.left.fill(0.0),
        }
        out.right.fill(0.0);

        if let Some(window) = self.rx_window {
            if now >= window.closes {
                self.rx_window = None;
                reports.report(Report::ReceiverDisabled);
            } else if now >= window.opens {
                match self.decode(mic) {
                    Some(symbol) => reports.report(Report::Decoded(symbol)),
                    None => reports.report(Report::DecodeError),
                }
            }
        }
    }
}

impl Default for QpskModem {
    fn default() -> Self {
        Self::new()
    }
}
