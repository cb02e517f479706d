//! blockfx - audio device setup and the two front ends (TUI, headless)

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};
use tracing::{error, info, warn};

use blockfx::{
    config::SAMPLE_RATE, engine::EventLatch, Engine, Report, Severity, SystemMode, BLOCK_SIZE,
};

use crate::driver::{BlockDriver, DriverChannels};
use crate::ui::UiApp;

/// Microphone ring: a few blocks of slack between the two callbacks
const MIC_RING_LEN: usize = BLOCK_SIZE * 8;
const KEY_RING_LEN: usize = 64;
const REPORT_RING_LEN: usize = 1024;
const SCOPE_RING_LEN: usize = BLOCK_SIZE * 4;

pub struct App {
    mode: SystemMode,
    tone_hz: f32,
}

/// UI-side ends of the rings
pub struct Controls {
    pub keys: Producer<char>,
    pub button: EventLatch,
    pub reports: Consumer<Report>,
    pub scope: Consumer<[f32; 2]>,
}

impl App {
    pub fn new(mode: SystemMode, tone_hz: f32) -> Self {
        Self { mode, tone_hz }
    }

    /// Open the devices, start both streams and hand over to a front end.
    pub fn run(self, headless: bool) -> EyreResult<()> {
        let host = cpal::default_host();
        let output_device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let input_device = host
            .default_input_device()
            .ok_or_else(|| eyre!("no default input device available"))?;

        let output_channels = output_device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?
            .channels();
        let input_channels = input_device
            .default_input_config()
            .wrap_err("failed to fetch default input config")?
            .channels();

        let output_config = cpal::StreamConfig {
            channels: output_channels,
            sample_rate: cpal::SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };
        let input_config = cpal::StreamConfig {
            channels: input_channels,
            sample_rate: cpal::SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };

        info!(
            mode = self.mode.label(),
            sample_rate = SAMPLE_RATE,
            block = BLOCK_SIZE,
            input_channels,
            output_channels,
            "starting audio"
        );

        let (mut mic_tx, mic_rx) = RingBuffer::<f32>::new(MIC_RING_LEN);
        let (key_tx, key_rx) = RingBuffer::<char>::new(KEY_RING_LEN);
        let (report_tx, report_rx) = RingBuffer::<Report>::new(REPORT_RING_LEN);
        let (scope_tx, scope_rx) = RingBuffer::<[f32; 2]>::new(SCOPE_RING_LEN);
        let button = EventLatch::new();

        let mut driver = BlockDriver::new(
            Engine::new(self.mode),
            self.tone_hz,
            DriverChannels {
                mic_rx,
                key_rx,
                button: button.clone(),
                reports: report_tx,
                scope_tx,
            },
        );

        // Keep the first channel of the microphone
        let in_stride = input_channels as usize;
        let input_stream = input_device
            .build_input_stream(
                &input_config,
                move |data: &[f32], _| {
                    for frame in data.chunks(in_stride) {
                        let _ = mic_tx.push(frame[0]);
                    }
                },
                |err| error!("input stream error: {err}"),
                None,
            )
            .wrap_err("failed to build input stream")?;

        let out_stride = output_channels as usize;
        let output_stream = output_device
            .build_output_stream(
                &output_config,
                move |data: &mut [f32], _| driver.fill(data, out_stride),
                |err| error!("output stream error: {err}"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        input_stream.play().wrap_err("failed to start input stream")?;
        output_stream
            .play()
            .wrap_err("failed to start output stream")?;

        let controls = Controls {
            keys: key_tx,
            button,
            reports: report_rx,
            scope: scope_rx,
        };

        if headless {
            run_headless(self.mode, controls)
        } else {
            let mut terminal = ratatui::init();
            let result = UiApp::new(self.mode, controls).run(&mut terminal);
            ratatui::restore();
            result
        }
    }
}

/// Line-based console: every character of a line is a key, an empty line
/// presses the button, `quit` or end of input stops.
fn run_headless(mode: SystemMode, controls: Controls) -> EyreResult<()> {
    let Controls {
        mut keys,
        button,
        mut reports,
        scope: _scope,
    } = controls;

    println!("=== blockfx: {} ===", mode.label());
    println!("{}", mode.usage());
    println!("Type keys and press Enter; an empty line presses the button; `quit` exits.");

    let running = Arc::new(AtomicBool::new(true));
    let reader_running = running.clone();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let line = line.trim();
            if line == "quit" {
                break;
            }
            if line.is_empty() {
                button.trigger();
            }
            for key in line.chars() {
                if keys.push(key).is_err() {
                    warn!("key buffer full, dropping {key:?}");
                }
            }
        }
        reader_running.store(false, Ordering::Release);
    });

    while running.load(Ordering::Acquire) {
        while let Ok(report) = reports.pop() {
            match report.severity() {
                Severity::Info => println!("{report}"),
                Severity::Warn => warn!("{report}"),
                Severity::Error => error!("{report}"),
            }
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    Ok(())
}
