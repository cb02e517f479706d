//! blockfx - terminal front end for the block engine
//!
//! Run with: cargo run -- --mode effects
//!
//! Microphone and a synthetic tone go in, two channels come out. Keys typed
//! in the terminal reach the engine one per block; the space bar is the
//! user button.

mod app;
mod driver;
mod ui;

use clap::{ArgAction, Parser};

use app::App;
use blockfx::{config::GENERATOR_DEFAULT_HZ, SystemMode};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Block-synchronous audio effects, modem and ranging demos",
    long_about = None
)]
struct Args {
    /// Program to run
    #[arg(short, long, value_enum, default_value_t = SystemMode::Effects)]
    mode: SystemMode,

    /// Frequency of the synthetic waveform source in Hz
    #[arg(short, long, default_value_t = GENERATOR_DEFAULT_HZ)]
    tone: f32,

    /// Plain line-based console instead of the TUI
    #[arg(long, default_value_t = false)]
    headless: bool,

    /// Verbosity level (-v=info, -vv=debug, -vvv=trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // 0 = WARN (quiet), 1 = INFO, 2 = DEBUG, 3+ = TRACE
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // The TUI owns the terminal; log lines would tear through it
    if args.headless {
        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::sink)
            .try_init();
    }

    App::new(args.mode, args.tone).run(args.headless)
}
