//! Route list with the current selection highlighted

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{Snapshot, StaticInfo};

pub fn render_routes(frame: &mut Frame, area: Rect, info: &StaticInfo, snapshot: &Snapshot, selected: usize) {
    let block = Block::default().title(" Routes ").borders(Borders::ALL);

    if snapshot.route_count == 0 {
        let empty = Paragraph::new(" no routes, press [T] to load a template")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    // Keep the selection on screen
    let visible = area.height.saturating_sub(2) as usize;
    let first = (selected + 1).saturating_sub(visible);

    let lines: Vec<Line> = snapshot
        .routes()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(i, route)| {
            let destination = info
                .destination(route.destination)
                .map_or("?", |(name, _)| name.as_str());

            let mut style = if route.enabled {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if i == selected {
                style = style.bg(Color::Blue).add_modifier(Modifier::BOLD);
            }

            Line::from(vec![
                Span::styled(format!("{:>4} ", route.id.to_string()), style),
                Span::styled(
                    format!(
                        "{:<12} → {:<20}",
                        info.source_name(route.source.index()),
                        destination
                    ),
                    style,
                ),
                Span::styled(format!(" {:+.2} ", route.amount), style.fg(Color::Cyan)),
                Span::styled(format!("{:<6}", route.curve.label()), style),
                Span::styled(if route.bipolar { " bi " } else { " uni" }, style),
                Span::styled(if route.enabled { "" } else { " off" }, style.fg(Color::Red)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
