//! Bar meters for destinations and sources

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{Snapshot, StaticInfo};

const DESTINATION_BAR: usize = 20;
const SOURCE_BAR: usize = 12;

fn bar(position: f64, width: usize) -> String {
    let filled = (position.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(width - filled))
}

/// Routed destinations, each drawn against its own range.
pub fn render_destinations(frame: &mut Frame, area: Rect, info: &StaticInfo, snapshot: &Snapshot) {
    let block = Block::default().title(" Destinations ").borders(Borders::ALL);

    // Destinations with at least one route, in catalog order
    let mut routed: Vec<_> = snapshot.routes().map(|r| r.destination).collect();
    routed.sort();
    routed.dedup();

    let lines: Vec<Line> = routed
        .into_iter()
        .filter_map(|id| {
            let (name, metadata) = info.destination(id)?;
            let value = snapshot.values.get(id)?;
            let clamped = metadata.clamp(value);

            // Out-of-range sums are clamped by the audio side; flag them
            let color = if clamped != value { Color::Red } else { Color::Green };
            Some(Line::from(vec![
                Span::raw(format!(" {name:<20} ")),
                Span::styled(bar(metadata.to_normalized(clamped), DESTINATION_BAR), Style::default().fg(color)),
                Span::styled(
                    format!(" {value:>9.2} {}", metadata.unit),
                    Style::default().fg(Color::Cyan),
                ),
            ]))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Smoothed source values as bipolar meters, filled column by column.
pub fn render_sources(frame: &mut Frame, area: Rect, info: &StaticInfo, snapshot: &Snapshot) {
    let block = Block::default().title(" Sources ").borders(Borders::ALL);

    let rows = area.height.saturating_sub(2).max(1) as usize;
    let values = &snapshot.sources[..snapshot.source_count];

    let lines: Vec<Line> = (0..rows)
        .map(|row| {
            let spans = (0..values.len())
                .skip(row)
                .step_by(rows)
                .flat_map(|i| {
                    let value = values[i];
                    [
                        Span::raw(format!(" {:<16}", info.source_name(i))),
                        Span::styled(bar((value + 1.0) * 0.5, SOURCE_BAR), Style::default().fg(Color::Magenta)),
                        Span::raw(format!(" {value:+.2} ")),
                    ]
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
