//! Two-channel oscilloscope widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Render left (cyan) and right (magenta) output traces
pub fn render_waveform(frame: &mut Frame, area: Rect, frames: &[[f32; 2]]) {
    let block = Block::default()
        .title(" Output  L ─ cyan  R ─ magenta ")
        .borders(Borders::ALL);

    let len = frames.len().max(1) as f64;
    let trace = |ch: usize| -> Vec<(f64, f64)> {
        frames
            .iter()
            .enumerate()
            .map(|(i, f)| (i as f64 / len, f[ch] as f64))
            .collect()
    };
    let left = trace(0);
    let right = trace(1);

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&left),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Magenta))
            .data(&right),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
