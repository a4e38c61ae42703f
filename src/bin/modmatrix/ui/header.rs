//! Header bar - template, route usage, tick counter and last status message

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use modmatrix::MAX_ROUTES;

use super::Snapshot;

pub fn render_header(frame: &mut Frame, area: Rect, snapshot: &Snapshot, template: Option<&str>, status: &str) {
    let block = Block::default().title(" modmatrix ").borders(Borders::ALL);

    let usage_color = if snapshot.route_count >= MAX_ROUTES {
        Color::Red
    } else {
        Color::Green
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" Template: {}  ", template.unwrap_or("-")),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Routes: {}/{}  ", snapshot.route_count, MAX_ROUTES),
            Style::default().fg(usage_color),
        ),
        Span::styled(format!("Tick {}  ", snapshot.tick), Style::default().fg(Color::DarkGray)),
        Span::styled(status.to_string(), Style::default().fg(Color::Yellow)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
