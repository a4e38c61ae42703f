//! TUI module for modmatrix
//!
//! Shows resolved destination values, the route list and live source
//! values. Edits go to the control thread as matrix commands.

mod header;
mod meters;
mod routes;
pub mod state;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;

use modmatrix::{MatrixCommand, MatrixEvent, MatrixHandle, RouteId};

pub use state::{Snapshot, StaticInfo};

use header::render_header;
use meters::{render_destinations, render_sources};
use routes::render_routes;

const AMOUNT_STEP: f64 = 0.05;

/// UI application state
pub struct UiApp {
    handle: MatrixHandle,
    snapshots: Consumer<Snapshot>,
    info: StaticInfo,
    current: Snapshot,
    /// Index into the route list
    selected: usize,
    /// Index into `info.templates` of the last template requested
    template: Option<usize>,
    status: String,
    should_quit: bool,
}

impl UiApp {
    pub fn new(handle: MatrixHandle, snapshots: Consumer<Snapshot>, info: StaticInfo) -> Self {
        Self {
            handle,
            snapshots,
            info,
            current: Snapshot::empty(),
            selected: 0,
            template: None,
            status: String::new(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_snapshots();
            self.poll_events();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
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

    fn poll_snapshots(&mut self) {
        // Keep only the latest
        while let Ok(snapshot) = self.snapshots.pop() {
            self.current = snapshot;
        }
        if self.current.route_count > 0 {
            self.selected = self.selected.min(self.current.route_count - 1);
        } else {
            self.selected = 0;
        }
    }

    fn poll_events(&mut self) {
        while let Some(event) = self.handle.poll_event() {
            self.status = match event {
                MatrixEvent::RouteAdded { route, .. } => format!("added {route}"),
                MatrixEvent::RouteRemoved(route) => format!("removed {route}"),
                MatrixEvent::RouteUpdated(_) => continue,
                MatrixEvent::TemplateLoaded { template, routes } => {
                    let name = self
                        .info
                        .templates
                        .iter()
                        .find(|(id, _)| *id == template)
                        .map_or("?", |(_, name)| name.as_str());
                    format!("loaded {name} ({routes} routes)")
                }
                MatrixEvent::Cleared => "cleared all routes".to_string(),
                MatrixEvent::Rejected { error, .. } => format!("rejected: {error}"),
            };
        }
    }

    fn selected_route(&self) -> Option<RouteId> {
        self.current.route(self.selected).map(|r| r.id)
    }

    fn send(&mut self, command: MatrixCommand) {
        if self.handle.send(command).is_err() {
            self.status = "command queue full".to_string();
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let route = self.current.route(self.selected).copied();

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('t') => {
                if !self.info.templates.is_empty() {
                    let next = self.template.map_or(0, |i| (i + 1) % self.info.templates.len());
                    self.template = Some(next);
                    self.send(MatrixCommand::LoadTemplate(self.info.templates[next].0));
                }
            }
            KeyCode::Char('c') => self.send(MatrixCommand::ClearRoutes),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.current.route_count {
                    self.selected += 1;
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                if let Some(r) = route {
                    self.send(MatrixCommand::SetAmount {
                        route: r.id,
                        amount: r.amount + AMOUNT_STEP,
                    });
                }
            }
            KeyCode::Char('-') => {
                if let Some(r) = route {
                    self.send(MatrixCommand::SetAmount {
                        route: r.id,
                        amount: r.amount - AMOUNT_STEP,
                    });
                }
            }
            KeyCode::Char('e') => {
                if let Some(r) = route {
                    self.send(MatrixCommand::SetEnabled {
                        route: r.id,
                        enabled: !r.enabled,
                    });
                }
            }
            KeyCode::Char('b') => {
                if let Some(r) = route {
                    self.send(MatrixCommand::SetBipolar {
                        route: r.id,
                        bipolar: !r.bipolar,
                    });
                }
            }
            KeyCode::Char('k') => {
                if let Some(r) = route {
                    self.send(MatrixCommand::SetCurve {
                        route: r.id,
                        curve: r.curve.next(),
                    });
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = self.selected_route() {
                    self.send(MatrixCommand::RemoveRoute(id));
                }
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(8),    // Routes + destinations
                Constraint::Length(13), // Sources
                Constraint::Length(1), // Help
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let template = self.template.map(|i| self.info.templates[i].1.as_str());
        render_header(frame, rows[0], &self.current, template, &self.status);
        render_routes(frame, columns[0], &self.info, &self.current, self.selected);
        render_destinations(frame, columns[1], &self.info, &self.current);
        render_sources(frame, rows[2], &self.info, &self.current);

        let help = Paragraph::new(
            " [T] Template  [C] Clear  [↑↓] Select  [+/-] Amount  [E] Enable  [B] Bipolar  [K] Curve  [X] Remove  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[3]);
    }
}
