//! Build-time configuration.
//!
//! Every size in the crate is fixed here. Relationships between the
//! constants are checked with `const` assertions, so a bad combination is a
//! compile error rather than something the audio callback has to cope with.

/// Driver sample rate in Hz.
pub const SAMPLE_RATE: u32 = 48_000;

/// Samples per block delivered by the driver.
pub const BLOCK_SIZE: usize = 960;

/// Duration of one block in seconds.
pub const BLOCK_TIME_S: f32 = BLOCK_SIZE as f32 / SAMPLE_RATE as f32;

/// Default frequency of the synthetic waveform source.
pub const GENERATOR_DEFAULT_HZ: f32 = 440.0;

// --- Effects -----------------------------------------------------------------

/// Flanger FIR length. The longest delay is `FLANGER_TAPS - 1` samples.
pub const FLANGER_TAPS: usize = 256;

/// Gain of the single moving flanger tap.
pub const FLANGER_TAP_GAIN: f32 = 0.5;

/// Ring modulator carrier centre frequency.
pub const RING_MOD_CARRIER_CENTER_HZ: f32 = 750.0;

/// Carrier swing; the carrier stays within centre ± width / 2.
pub const RING_MOD_CARRIER_WIDTH_HZ: f32 = 1000.0;

/// Time for one full up-and-down sweep of the carrier.
pub const RING_MOD_SWEEP_TIME_S: f32 = 10.0;

/// Carrier step applied once per block.
pub const RING_MOD_CARRIER_DELTA_HZ: f32 = 2.0 * RING_MOD_CARRIER_WIDTH_HZ * BLOCK_SIZE as f32
    / (RING_MOD_SWEEP_TIME_S * SAMPLE_RATE as f32);

/// Coarsest bit-crusher resolution.
pub const BITCRUSH_MIN_DEPTH: u8 = 1;

/// Finest bit-crusher resolution (also the start-up depth).
pub const BITCRUSH_MAX_DEPTH: u8 = 5;

// --- Spectral ----------------------------------------------------------------

/// Anti-alias band-pass length (odd, linear phase).
pub const ANTI_ALIAS_TAPS: usize = 257;

/// Upper band edge relative to Nyquist, in thousandths.
pub const ANTI_ALIAS_REL_CUTOFF_PERMILLE: usize = 750;

/// Lower band edge; removes the microphone's DC bias.
pub const ANTI_ALIAS_LOW_CUTOFF_HZ: f32 = 300.0;

/// Number of FFT bins the spectral shifter moves the signal up.
pub const FREQ_SHIFT_BINS: usize = 5;

/// Interval between peak-frequency reports.
pub const SPECTRUM_REPORT_INTERVAL_MS: u64 = 1000;

/// Taps of the low-pass used by the fast-convolution mode.
pub const FAST_CONV_TAPS: usize = 64;

/// Cut-off of the fast-convolution low-pass.
pub const FAST_CONV_CUTOFF_HZ: f32 = 4_000.0;

/// FFT length of the overlap-add convolver.
pub const FAST_CONV_FFT_LEN: usize = 2 * BLOCK_SIZE;

// --- QPSK --------------------------------------------------------------------

/// QPSK carrier frequency. A block always holds a whole number of cycles.
pub const QPSK_CARRIER_HZ: u32 = 500;

/// Length of the fixed message, in symbols (one symbol per block).
pub const QPSK_MESSAGE_LEN: usize = 64;

/// Blocks between a message request and the opening of its receive window,
/// covering the output-to-input latency of the audio path.
pub const QPSK_RX_LATENCY_BLOCKS: usize = 1;

// --- Radar -------------------------------------------------------------------

/// Chirp template length in samples.
pub const RADAR_CHIRP_LEN: usize = 256;

/// Position of the chirp inside the transmit block.
pub const RADAR_TX_OFFSET: usize = 0;

/// Chirp start frequency.
pub const RADAR_F_START_HZ: f32 = 2_000.0;

/// Chirp stop frequency.
pub const RADAR_F_STOP_HZ: f32 = 8_000.0;

/// Correlation output length (one value per non-negative lag).
pub const RADAR_CORR_LEN: usize = BLOCK_SIZE;

/// Period of the single-shot ranger's transmit timer.
pub const RADAR_TX_PERIOD_MS: u64 = 2_000;

/// Blocks between transmitting and correlating the echo.
pub const RADAR_ECHO_DELAY_BLOCKS: u32 = 3;

/// Blocks accumulated by the averaging ranger before each report.
pub const RADAR_AVERAGE_BLOCKS: u32 = 25;

/// Chirp amplitude of the averaging ranger, which transmits every block.
pub const RADAR_AVERAGE_CHIRP_GAIN: f32 = 0.5;

/// Speed of sound used for the lag-to-distance conversion, in m/s.
pub const SPEED_OF_SOUND_M_S: f32 = 343.0;

// --- Build-time checks -------------------------------------------------------

const _: () = assert!(BLOCK_SIZE > 0 && SAMPLE_RATE > 0);
const _: () = assert!(FLANGER_TAPS >= 3, "flanger needs room to sweep");
const _: () = assert!(BITCRUSH_MIN_DEPTH >= 1 && BITCRUSH_MIN_DEPTH <= BITCRUSH_MAX_DEPTH);
const _: () = assert!(BITCRUSH_MAX_DEPTH <= 24, "depth beyond f32 mantissa");
const _: () = assert!(ANTI_ALIAS_TAPS % 2 == 1, "band-pass design needs an odd length");
const _: () = assert!(ANTI_ALIAS_REL_CUTOFF_PERMILLE < 1000);
const _: () = assert!(
    (BLOCK_SIZE as u64 * QPSK_CARRIER_HZ as u64) % SAMPLE_RATE as u64 == 0,
    "a QPSK symbol must span a whole number of carrier cycles"
);
const _: () = assert!(FAST_CONV_TAPS - 1 <= BLOCK_SIZE);
const _: () = assert!(FAST_CONV_FFT_LEN >= BLOCK_SIZE + FAST_CONV_TAPS - 1);
const _: () = assert!(RADAR_TX_OFFSET + RADAR_CHIRP_LEN <= BLOCK_SIZE);
const _: () = assert!(RADAR_CHIRP_LEN <= RADAR_CORR_LEN);
const _: () = assert!(RADAR_ECHO_DELAY_BLOCKS >= 1 && RADAR_AVERAGE_BLOCKS >= 1);
const _: () = assert!(QPSK_MESSAGE_LEN > 0);
