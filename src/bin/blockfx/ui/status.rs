//! Status bar widget - mode, engine summary and output level

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use blockfx::{BLOCK_SIZE, SAMPLE_RATE};

use super::UiState;

/// Output level statistics for display
pub struct LevelStats {
    pub peak: f32,
    pub rms: f32,
}

impl LevelStats {
    /// Compute level stats over both scope channels
    pub fn from_frames(frames: &[[f32; 2]]) -> Self {
        if frames.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let samples = frames.iter().flatten();
        let peak = samples.clone().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (samples.map(|&x| x * x).sum::<f32>() / (2 * frames.len()) as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the status bar
pub fn render_status(frame: &mut Frame, area: Rect, state: &UiState, levels: &LevelStats) {
    let block = Block::default()
        .title(" blockfx ")
        .borders(Borders::ALL);

    let block_ms = BLOCK_SIZE as f32 * 1000.0 / SAMPLE_RATE as f32;

    let line = Line::from(vec![
        Span::styled(
            format!(" {}  ", state.mode.label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{}  ", state.summary()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:.1}kHz / {block_ms:.0}ms blocks  ", SAMPLE_RATE as f32 / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", levels.peak, levels.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
