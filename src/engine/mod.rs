//! The control-thread owner of every table.
//!
//! `ModMatrix` is the only thing that mutates routing state. Other threads
//! talk to it through a [`CommandReceiver`] (normally the rtrb queue from
//! [`command_channel`]) which is drained at the start of each control tick,
//! so edits never land halfway through a resolve.

#[cfg(feature = "rtrb")]
pub mod channel;
pub mod config;
pub mod message;

use thiserror::Error;

use crate::{
    destination::{DestinationId, DestinationTable},
    error::RoutingError,
    route::{Curve, CustomCurve, ModulationRoute, RouteId, RouteParams},
    routing::{ResolvedValues, RoutingTable},
    source::{SourceId, SourceTable},
    template::{TemplateId, TemplateLibrary},
};

#[cfg(feature = "rtrb")]
pub use channel::{command_channel, CommandQueue, MatrixHandle};
pub use config::{ConfigError, EngineConfig};
pub use message::{CommandReceiver, MatrixCommand, MatrixEvent};

/// Why a matrix could not be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid engine config: {0}")]
    Config(#[from] ConfigError),

    #[error("initial template: {0}")]
    Routing(#[from] RoutingError),
}

pub struct ModMatrix {
    sources: SourceTable,
    destinations: DestinationTable,
    routing: RoutingTable,
    templates: TemplateLibrary,
    resolved: ResolvedValues,
}

impl ModMatrix {
    /// Built-in catalogs and templates, loading `initial_template` if set.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Self::with_tables(
            config,
            SourceTable::builtin(config.smoothing_time),
            DestinationTable::builtin(),
            TemplateLibrary::with_builtins(),
        )
    }

    /// Custom catalogs. The routing table is sized for them.
    pub fn with_tables(
        config: &EngineConfig,
        sources: SourceTable,
        destinations: DestinationTable,
        templates: TemplateLibrary,
    ) -> Result<Self, EngineError> {
        let routing = RoutingTable::for_tables(&sources, &destinations);
        let mut matrix = Self {
            sources,
            destinations,
            routing,
            templates,
            resolved: ResolvedValues::new(),
        };

        if let Some(name) = &config.initial_template {
            matrix.load_template(name)?;
        }
        matrix.refresh();
        Ok(matrix)
    }

    pub fn sources(&self) -> &SourceTable {
        &self.sources
    }

    pub fn destinations(&self) -> &DestinationTable {
        &self.destinations
    }

    pub fn routing(&self) -> &RoutingTable {
        &self.routing
    }

    pub fn templates(&self) -> &TemplateLibrary {
        &self.templates
    }

    /// For registering user templates.
    pub fn templates_mut(&mut self) -> &mut TemplateLibrary {
        &mut self.templates
    }

    /// Values from the last tick.
    pub fn resolved(&self) -> &ResolvedValues {
        &self.resolved
    }

    pub fn push_source(&mut self, source: SourceId, value: f64) -> Result<(), RoutingError> {
        self.sources.push_value(source, value)
    }

    pub fn set_time_constant(&mut self, source: SourceId, seconds: f64) -> Result<(), RoutingError> {
        self.sources.set_time_constant(source, seconds)
    }

    pub fn add_route(
        &mut self,
        source: SourceId,
        destination: DestinationId,
        params: RouteParams,
    ) -> Result<RouteId, RoutingError> {
        self.routing.add_route(source, destination, params)
    }

    /// As [`add_route`](Self::add_route), looking both ends up by name.
    pub fn add_route_named(&mut self, source: &str, destination: &str, params: RouteParams) -> Result<RouteId, RoutingError> {
        let source = self.sources.id_of(source).ok_or(RoutingError::UnknownSource)?;
        let destination = self
            .destinations
            .id_of(destination)
            .ok_or(RoutingError::UnknownDestination)?;
        self.add_route(source, destination, params)
    }

    pub fn remove_route(&mut self, route: RouteId) -> Result<ModulationRoute, RoutingError> {
        self.routing.remove_route(route)
    }

    pub fn set_amount(&mut self, route: RouteId, amount: f64) -> Result<(), RoutingError> {
        self.routing.set_amount(route, amount)
    }

    pub fn set_curve(&mut self, route: RouteId, curve: Curve) -> Result<(), RoutingError> {
        self.routing.set_curve(route, curve)
    }

    pub fn set_enabled(&mut self, route: RouteId, enabled: bool) -> Result<(), RoutingError> {
        self.routing.set_enabled(route, enabled)
    }

    pub fn set_bipolar(&mut self, route: RouteId, bipolar: bool) -> Result<(), RoutingError> {
        self.routing.set_bipolar(route, bipolar)
    }

    pub fn set_source_multiplier(&mut self, route: RouteId, multiplier: f64) -> Result<(), RoutingError> {
        self.routing.set_source_multiplier(route, multiplier)
    }

    pub fn set_custom_curve(&mut self, route: RouteId, table: Option<CustomCurve>) -> Result<(), RoutingError> {
        self.routing.set_custom_curve(route, table)
    }

    pub fn clear_routes(&mut self) {
        self.routing.clear();
    }

    /// Replace the routing table with a template. Source smoothing carries
    /// on from where it was.
    pub fn load_template(&mut self, name: &str) -> Result<usize, RoutingError> {
        let id = self.templates.id_of(name).ok_or(RoutingError::UnknownTemplate)?;
        self.load_template_id(id)
    }

    pub fn load_template_id(&mut self, template: TemplateId) -> Result<usize, RoutingError> {
        self.templates
            .load_id(template, &mut self.routing, &self.sources, &self.destinations)
    }

    /// Resolve a single destination from the current smoothed values.
    pub fn resolve(&self, destination: DestinationId) -> Result<f64, RoutingError> {
        self.routing.resolve(destination, &self.sources, &self.destinations)
    }

    /// Apply one command, returning the event to report on success.
    pub fn apply(&mut self, command: MatrixCommand) -> Result<Option<MatrixEvent>, RoutingError> {
        let event = match command {
            MatrixCommand::PushSource { source, value } => {
                self.push_source(source, value)?;
                None
            }
            MatrixCommand::AddRoute {
                source,
                destination,
                params,
            } => {
                let route = self.add_route(source, destination, params)?;
                Some(MatrixEvent::RouteAdded {
                    route,
                    source,
                    destination,
                })
            }
            MatrixCommand::RemoveRoute(route) => {
                self.remove_route(route)?;
                Some(MatrixEvent::RouteRemoved(route))
            }
            MatrixCommand::SetAmount { route, amount } => {
                self.set_amount(route, amount)?;
                Some(MatrixEvent::RouteUpdated(route))
            }
            MatrixCommand::SetCurve { route, curve } => {
                self.set_curve(route, curve)?;
                Some(MatrixEvent::RouteUpdated(route))
            }
            MatrixCommand::SetEnabled { route, enabled } => {
                self.set_enabled(route, enabled)?;
                Some(MatrixEvent::RouteUpdated(route))
            }
            MatrixCommand::SetBipolar { route, bipolar } => {
                self.set_bipolar(route, bipolar)?;
                Some(MatrixEvent::RouteUpdated(route))
            }
            MatrixCommand::SetSourceMultiplier { route, multiplier } => {
                self.set_source_multiplier(route, multiplier)?;
                Some(MatrixEvent::RouteUpdated(route))
            }
            MatrixCommand::SetCustomCurve { route, table } => {
                self.set_custom_curve(route, table)?;
                Some(MatrixEvent::RouteUpdated(route))
            }
            MatrixCommand::LoadTemplate(template) => {
                let routes = self.load_template_id(template)?;
                Some(MatrixEvent::TemplateLoaded { template, routes })
            }
            MatrixCommand::ClearRoutes => {
                self.clear_routes();
                Some(MatrixEvent::Cleared)
            }
        };
        Ok(event)
    }

    /// One control tick: drain pending commands, advance smoothing by `dt`
    /// seconds and resolve every destination.
    pub fn process<R>(&mut self, dt: f64, rx: &mut R) -> &ResolvedValues
    where
        R: CommandReceiver + ?Sized,
    {
        while let Some(command) = rx.pop() {
            match self.apply(command) {
                Ok(Some(event)) => rx.report(event),
                Ok(None) => {}
                Err(error) => {
                    log::warn!("rejected {command:?}: {error}");
                    rx.report(MatrixEvent::Rejected { command, error });
                }
            }
        }
        self.tick(dt)
    }

    /// Advance smoothing and resolve, without touching any queue.
    pub fn tick(&mut self, dt: f64) -> &ResolvedValues {
        self.sources.tick(dt);
        self.refresh();
        &self.resolved
    }

    fn refresh(&mut self) {
        self.routing
            .resolve_all_into(&mut self.resolved, &self.sources, &self.destinations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::VecDeque;

    fn matrix() -> ModMatrix {
        let config = EngineConfig {
            smoothing_time: 0.0,
            ..Default::default()
        };
        ModMatrix::new(&config).unwrap()
    }

    #[test]
    fn test_initial_template_loaded() {
        let config = EngineConfig {
            initial_template: Some("EXPRESSIVE".into()),
            ..Default::default()
        };
        let matrix = ModMatrix::new(&config).unwrap();
        assert_eq!(matrix.routing().route_count(), 6);
        assert_eq!(matrix.resolved().len(), matrix.destinations().len());
    }

    #[test]
    fn test_unknown_initial_template_fails() {
        let config = EngineConfig {
            initial_template: Some("MISSING".into()),
            ..Default::default()
        };
        assert!(matches!(
            ModMatrix::new(&config),
            Err(EngineError::Routing(RoutingError::UnknownTemplate))
        ));
    }

    #[test]
    fn test_process_drains_then_resolves() {
        let mut m = matrix();
        let wheel = m.sources().id_of("MOD WHEEL").unwrap();
        let res = m.destinations().id_of("FILTER1 RESONANCE").unwrap();

        let mut queue = VecDeque::from([
            MatrixCommand::AddRoute {
                source: wheel,
                destination: res,
                params: RouteParams::default().amount(1.0),
            },
            MatrixCommand::PushSource {
                source: wheel,
                value: 0.25,
            },
        ]);

        let values = m.process(0.002, &mut queue);
        assert_relative_eq!(values[res], 50.25);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_apply_reports_events() {
        let mut m = matrix();
        let event = m
            .apply(MatrixCommand::AddRoute {
                source: SourceId(0),
                destination: DestinationId(0),
                params: RouteParams::default(),
            })
            .unwrap();
        let Some(MatrixEvent::RouteAdded { route, .. }) = event else {
            panic!("expected RouteAdded, got {event:?}");
        };

        assert_eq!(
            m.apply(MatrixCommand::SetAmount { route, amount: 0.1 }),
            Ok(Some(MatrixEvent::RouteUpdated(route)))
        );
        assert_eq!(
            m.apply(MatrixCommand::AddRoute {
                source: SourceId(0),
                destination: DestinationId(0),
                params: RouteParams::default(),
            }),
            Err(RoutingError::DuplicateRoute)
        );
        assert_eq!(m.apply(MatrixCommand::ClearRoutes), Ok(Some(MatrixEvent::Cleared)));
        assert!(m.routing().is_empty());
    }

    #[test]
    fn test_load_template_keeps_smoothing_state() {
        let config = EngineConfig {
            smoothing_time: 1.0,
            ..Default::default()
        };
        let mut m = ModMatrix::new(&config).unwrap();
        let env = m.sources().id_of("ENV 1").unwrap();
        m.push_source(env, 1.0).unwrap();
        m.tick(0.01);
        let gliding = m.sources().value_of(env).unwrap();
        assert!(gliding > 0.0 && gliding < 0.1);

        m.load_template("VIBRATO").unwrap();
        assert_eq!(m.sources().value_of(env), Ok(gliding));

        // The glide continues from the same point on the next tick
        m.tick(0.01);
        let next = m.sources().value_of(env).unwrap();
        assert!(next > gliding && next < 0.1);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn test_rejected_command_reported_over_channel() {
        let mut m = matrix();
        let (mut handle, mut queue) = command_channel(8);
        handle.remove_route(RouteId(42)).unwrap();
        m.process(0.002, &mut queue);

        assert_eq!(
            handle.poll_event(),
            Some(MatrixEvent::Rejected {
                command: MatrixCommand::RemoveRoute(RouteId(42)),
                error: RoutingError::UnknownRoute(RouteId(42)),
            })
        );
    }
}
