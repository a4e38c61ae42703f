use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    destination::DestinationId,
    engine::message::{CommandReceiver, MatrixCommand, MatrixEvent},
    route::{Curve, CustomCurve, RouteId, RouteParams},
    source::SourceId,
    template::TemplateId,
};

/// Editing side of the command channel: UI, MIDI thread, automation.
pub struct MatrixHandle {
    commands: Producer<MatrixCommand>,
    events: Consumer<MatrixEvent>,
}

/// Control-thread side. Pass it to [`ModMatrix::process`](crate::engine::ModMatrix::process).
pub struct CommandQueue {
    commands: Consumer<MatrixCommand>,
    events: Producer<MatrixEvent>,
}

/// A pair of SPSC ring buffers, `capacity` slots each way.
pub fn command_channel(capacity: usize) -> (MatrixHandle, CommandQueue) {
    let (cmd_tx, cmd_rx) = RingBuffer::<MatrixCommand>::new(capacity);
    let (evt_tx, evt_rx) = RingBuffer::<MatrixEvent>::new(capacity);

    (
        MatrixHandle {
            commands: cmd_tx,
            events: evt_rx,
        },
        CommandQueue {
            commands: cmd_rx,
            events: evt_tx,
        },
    )
}

impl MatrixHandle {
    /// Queue a command. Hands it back if the queue is full.
    pub fn send(&mut self, command: MatrixCommand) -> Result<(), MatrixCommand> {
        self.commands.push(command).map_err(|rtrb::PushError::Full(cmd)| cmd)
    }

    pub fn push_source(&mut self, source: SourceId, value: f64) -> Result<(), MatrixCommand> {
        self.send(MatrixCommand::PushSource { source, value })
    }

    pub fn add_route(
        &mut self,
        source: SourceId,
        destination: DestinationId,
        params: RouteParams,
    ) -> Result<(), MatrixCommand> {
        self.send(MatrixCommand::AddRoute {
            source,
            destination,
            params,
        })
    }

    pub fn remove_route(&mut self, route: RouteId) -> Result<(), MatrixCommand> {
        self.send(MatrixCommand::RemoveRoute(route))
    }

    pub fn set_amount(&mut self, route: RouteId, amount: f64) -> Result<(), MatrixCommand> {
        self.send(MatrixCommand::SetAmount { route, amount })
    }

    pub fn set_curve(&mut self, route: RouteId, curve: Curve) -> Result<(), MatrixCommand> {
        self.send(MatrixCommand::SetCurve { route, curve })
    }

    pub fn set_enabled(&mut self, route: RouteId, enabled: bool) -> Result<(), MatrixCommand> {
        self.send(MatrixCommand::SetEnabled { route, enabled })
    }

    pub fn set_bipolar(&mut self, route: RouteId, bipolar: bool) -> Result<(), MatrixCommand> {
        self.send(MatrixCommand::SetBipolar { route, bipolar })
    }

    pub fn set_source_multiplier(&mut self, route: RouteId, multiplier: f64) -> Result<(), MatrixCommand> {
        self.send(MatrixCommand::SetSourceMultiplier { route, multiplier })
    }

    pub fn set_custom_curve(&mut self, route: RouteId, table: Option<CustomCurve>) -> Result<(), MatrixCommand> {
        self.send(MatrixCommand::SetCustomCurve { route, table })
    }

    pub fn load_template(&mut self, template: TemplateId) -> Result<(), MatrixCommand> {
        self.send(MatrixCommand::LoadTemplate(template))
    }

    pub fn clear_routes(&mut self) -> Result<(), MatrixCommand> {
        self.send(MatrixCommand::ClearRoutes)
    }

    /// Next event reported by the control thread.
    pub fn poll_event(&mut self) -> Option<MatrixEvent> {
        self.events.pop().ok()
    }

    /// Free command slots.
    pub fn slots(&self) -> usize {
        self.commands.slots()
    }
}

impl CommandReceiver for CommandQueue {
    fn pop(&mut self) -> Option<MatrixCommand> {
        self.commands.pop().ok()
    }

    // A full event queue drops the event; the editing side is behind
    fn report(&mut self, event: MatrixEvent) {
        let _ = self.events.push(event);
    }
}

impl CommandReceiver for Consumer<MatrixCommand> {
    fn pop(&mut self) -> Option<MatrixCommand> {
        Consumer::pop(self).ok()
    }
}
