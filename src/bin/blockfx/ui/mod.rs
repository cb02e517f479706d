//! TUI module for blockfx
//!
//! Status bar, report log and an output oscilloscope. Typed characters go
//! to the engine as keys; the space bar is the user button.

pub mod state;
mod status;
mod waveform;

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};

use blockfx::{Severity, SystemMode};

pub use state::UiState;

use crate::app::Controls;
use status::{render_status, LevelStats};
use waveform::render_waveform;

/// Scope history in decimated frames
const SCOPE_LEN: usize = 1024;

/// UI application state
pub struct UiApp {
    controls: Controls,
    state: UiState,
    /// Latest output frames for the scope
    scope: Vec<[f32; 2]>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(mode: SystemMode, controls: Controls) -> Self {
        Self {
            controls,
            state: UiState::new(mode),
            scope: vec![[0.0; 2]; SCOPE_LEN],
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_scope();
            self.poll_reports();

            terminal.draw(|frame| self.render(frame))?;

            // Non-blocking, ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn poll_scope(&mut self) {
        let mut fresh = Vec::new();
        while let Ok(frame) = self.controls.scope.pop() {
            fresh.push(frame);
        }

        if !fresh.is_empty() {
            self.scope.extend(fresh);
            if self.scope.len() > SCOPE_LEN {
                let excess = self.scope.len() - SCOPE_LEN;
                self.scope.drain(0..excess);
            }
        }
    }

    fn poll_reports(&mut self) {
        while let Ok(report) = self.controls.reports.pop() {
            self.state.apply(report);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(' ') => self.controls.button.trigger(),
            KeyCode::Char(c) => {
                // Full ring: the audio side is behind, the key is dropped
                let _ = self.controls.keys.push(c);
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: status, log, scope, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(6),    // Report log
                Constraint::Length(10), // Scope
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let levels = LevelStats::from_frames(&self.scope);
        render_status(frame, chunks[0], &self.state, &levels);

        // Newest reports at the bottom
        let log_block = Block::default().title(" Reports ").borders(Borders::ALL);
        let visible = log_block.inner(chunks[1]).height as usize;
        let lines: Vec<Line> = self
            .state
            .log
            .iter()
            .skip(self.state.log.len().saturating_sub(visible))
            .map(|(severity, text)| {
                let color = match severity {
                    Severity::Info => Color::White,
                    Severity::Warn => Color::Yellow,
                    Severity::Error => Color::Red,
                };
                Line::styled(text.as_str(), Style::default().fg(color))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).block(log_block), chunks[1]);

        render_waveform(frame, chunks[2], &self.scope);

        let help = Paragraph::new(format!(
            " [Esc/Q] Quit  [Space] Button  {}",
            self.state.mode.usage()
        ))
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
