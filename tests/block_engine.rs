use blockfx::config::{QPSK_MESSAGE_LEN, RADAR_ECHO_DELAY_BLOCKS, SPEED_OF_SOUND_M_S};
use blockfx::dsp::oscillator::sine_block;
use blockfx::effects::EffectMode;
use blockfx::modem::{qpsk::test_message, QpskSymbol};
use blockfx::radar::chirp_template;
use blockfx::spectral::FrequencyShifter;
use blockfx::{
    Block, BlockInput, Engine, InputSource, Report, StereoBlock, SystemMode, BLOCK_SIZE,
    SAMPLE_RATE, SILENCE,
};
use rustfft::{num_complex::Complex, FftPlanner};

fn tone(frequency: f32, amplitude: f32) -> Block {
    let mut block = SILENCE;
    sine_block(frequency, 0.0, SAMPLE_RATE as f32, &mut block);
    block.iter_mut().for_each(|s| *s *= amplitude);
    block
}

fn peak_bin(block: &Block) -> usize {
    let mut buffer: Vec<Complex<f32>> = block.iter().map(|&x| Complex::new(x, 0.0)).collect();
    FftPlanner::new().plan_fft_forward(BLOCK_SIZE).process(&mut buffer);
    (0..=BLOCK_SIZE / 2)
        .max_by(|&a, &b| buffer[a].norm().total_cmp(&buffer[b].norm()))
        .unwrap_or(0)
}

#[test]
fn effects_mode_bitcrushes_generator_to_one_bit() {
    let mut engine = Engine::new(SystemMode::Effects);
    let mic = SILENCE;
    let generator = tone(440.0, 0.9);
    let mut out = StereoBlock::silence();
    let mut reports: Vec<Report> = Vec::new();

    let commands = [
        BlockInput::new(&mic, &generator).with_button(),
        BlockInput::new(&mic, &generator).with_key('b'),
        BlockInput::new(&mic, &generator).with_key('-'),
        BlockInput::new(&mic, &generator).with_key('-'),
        BlockInput::new(&mic, &generator).with_key('-'),
        BlockInput::new(&mic, &generator).with_key('-'),
        BlockInput::new(&mic, &generator).with_key('-'),
    ];
    for input in &commands {
        engine.process_block(input, &mut out, &mut reports);
    }

    assert_eq!(reports[0], Report::SourceSelected(InputSource::Generator));
    assert_eq!(reports[1], Report::EffectSelected(EffectMode::Bitcrush));
    assert_eq!(&reports[2..], &[4, 3, 2, 1, 1].map(Report::BitDepth));

    // One bit: only -1, 0 and 1 survive, and the 0.9 peaks round up
    assert!(out.left.iter().all(|&s| s == -1.0 || s == 0.0 || s == 1.0));
    assert!(out.left.contains(&1.0));
    assert_eq!(out.left, out.right);
}

#[test]
fn unknown_key_leaves_effect_unchanged() {
    let mut engine = Engine::new(SystemMode::Effects);
    let mic = tone(1_000.0, 0.5);
    let mut out = StereoBlock::silence();
    let mut reports: Vec<Report> = Vec::new();

    engine.process_block(&BlockInput::new(&mic, &SILENCE).with_key('x'), &mut out, &mut reports);
    assert_eq!(reports, vec![Report::InvalidKey('x')]);
    assert_eq!(out.left, mic);
}

#[test]
fn spectral_shift_moves_tone_up_by_shift() {
    let mut engine = Engine::new(SystemMode::SpectralShift);
    let mic = tone(2_000.0, 0.5);
    let mut out = StereoBlock::silence();
    let mut reports: Vec<Report> = Vec::new();

    // Let the anti-alias filter fill
    for _ in 0..3 {
        engine.process_block(&BlockInput::new(&mic, &SILENCE), &mut out, &mut reports);
    }

    let bin_hz = SAMPLE_RATE as f32 / BLOCK_SIZE as f32;
    let shift_bins = (FrequencyShifter::SHIFT_HZ / bin_hz).round() as usize;
    assert_eq!(out.left, mic);
    assert_eq!(peak_bin(&out.left), 40);
    assert_eq!(peak_bin(&out.right), 40 + shift_bins);

    // One report at start-up
    let peaks = reports
        .iter()
        .filter(|r| matches!(r, Report::PeakFrequency { .. }))
        .count();
    assert_eq!(peaks, 1);
}

#[test]
fn qpsk_loopback_through_engine() {
    let mut engine = Engine::new(SystemMode::Qpsk);
    let mut out = StereoBlock::silence();
    let mut mic = SILENCE;
    let mut reports: Vec<Report> = Vec::new();

    engine.process_block(&BlockInput::new(&mic, &SILENCE).with_button(), &mut out, &mut reports);
    for _ in 0..QPSK_MESSAGE_LEN + 4 {
        mic = out.left;
        engine.process_block(&BlockInput::new(&mic, &SILENCE), &mut out, &mut reports);
        assert_eq!(out.right, SILENCE);
    }

    let decoded: Vec<QpskSymbol> = reports
        .iter()
        .filter_map(|r| match r {
            Report::Decoded(s) => Some(*s),
            _ => None,
        })
        .collect();
    assert_eq!(decoded.as_slice(), test_message().as_slice());
    assert_eq!(reports.last(), Some(&Report::ReceiverDisabled));
    assert!(!reports.contains(&Report::DecodeError));
}

#[test]
fn radar_ranges_echo_in_noise() {
    let mut engine = Engine::new(SystemMode::Radar);
    let mut out = StereoBlock::silence();
    let mut reports: Vec<Report> = Vec::new();

    let offset = 300;
    let template = chirp_template(1.0);
    let mut seed = 0x2545_f491_u32;
    let mut echo = SILENCE;
    for s in echo.iter_mut() {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        *s = (seed as f32 / u32::MAX as f32 - 0.5) * 0.2;
    }
    for (s, &t) in echo[offset..].iter_mut().zip(&template) {
        *s += 0.5 * t;
    }

    for block in 0..=RADAR_ECHO_DELAY_BLOCKS {
        let mic = if block == RADAR_ECHO_DELAY_BLOCKS { echo } else { SILENCE };
        engine.process_block(&BlockInput::new(&mic, &SILENCE), &mut out, &mut reports);
        if block == 0 {
            assert_eq!(out.left, SILENCE);
            assert_ne!(out.right, SILENCE);
        }
    }

    let reading = reports
        .iter()
        .find_map(|r| match r {
            Report::Range(reading) => Some(*reading),
            _ => None,
        });
    let reading = reading.expect("echo should be ranged");
    assert!((reading.index - offset as f32).abs() <= 1.0);
    let expected = offset as f32 * SPEED_OF_SOUND_M_S / SAMPLE_RATE as f32;
    assert!((reading.distance_m - expected).abs() < 0.01);
}

#[test]
fn every_mode_writes_bounded_output() {
    use clap::ValueEnum;

    let mic = tone(700.0, 0.5);
    let generator = tone(440.0, 0.5);
    for &mode in SystemMode::value_variants() {
        let mut engine = Engine::new(mode);
        let mut out = StereoBlock::silence();
        let mut reports: Vec<Report> = Vec::new();
        for _ in 0..10 {
            engine.process_block(&BlockInput::new(&mic, &generator), &mut out, &mut reports);
            let mut samples = out.left.iter().chain(&out.right);
            assert!(samples.clone().all(|s| s.is_finite()), "{mode:?}");
            assert!(samples.all(|s| s.abs() <= 2.0), "{mode:?}");
        }
        assert_eq!(engine.now().samples(), 10 * BLOCK_SIZE as u64);
    }
}
