use crate::{
    destination::DestinationId,
    error::RoutingError,
    route::{Curve, CustomCurve, RouteId, RouteParams},
    source::SourceId,
    template::TemplateId,
};

/// A request for the control thread. `Copy` so it fits in a lock-free queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatrixCommand {
    PushSource { source: SourceId, value: f64 },
    AddRoute { source: SourceId, destination: DestinationId, params: RouteParams },
    RemoveRoute(RouteId),
    SetAmount { route: RouteId, amount: f64 },
    SetCurve { route: RouteId, curve: Curve },
    SetEnabled { route: RouteId, enabled: bool },
    SetBipolar { route: RouteId, bipolar: bool },
    SetSourceMultiplier { route: RouteId, multiplier: f64 },
    SetCustomCurve { route: RouteId, table: Option<CustomCurve> },
    LoadTemplate(TemplateId),
    ClearRoutes,
}

/// What happened to a command, reported back to the editing side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatrixEvent {
    RouteAdded { route: RouteId, source: SourceId, destination: DestinationId },
    RouteRemoved(RouteId),
    RouteUpdated(RouteId),
    TemplateLoaded { template: TemplateId, routes: usize },
    Cleared,
    Rejected { command: MatrixCommand, error: RoutingError },
}

/// Where the control thread gets its commands from.
pub trait CommandReceiver {
    fn pop(&mut self) -> Option<MatrixCommand>;

    /// Hand an event back to the sender. Dropped by default.
    fn report(&mut self, _event: MatrixEvent) {}
}

/// Single-threaded receiver. Commands pop from the front; events are
/// discarded.
impl CommandReceiver for std::collections::VecDeque<MatrixCommand> {
    fn pop(&mut self) -> Option<MatrixCommand> {
        self.pop_front()
    }
}
