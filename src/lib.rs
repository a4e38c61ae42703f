pub mod destination; // Parameter metadata and range rules
pub mod engine; // Control-thread owner and command queue
pub mod error;
pub mod io; // MIDI ingestion into sources
pub mod route;
pub mod routing; // Route storage and per-destination resolution
pub mod source; // Raw and smoothed source values
pub mod template; // Preset route bundles

pub use destination::{DestinationId, DestinationMetadata, DestinationTable, NativeCurve};
#[cfg(feature = "rtrb")]
pub use engine::{command_channel, CommandQueue, MatrixHandle};
pub use engine::{CommandReceiver, EngineConfig, EngineError, MatrixCommand, MatrixEvent, ModMatrix};
pub use io::{MidiEvent, MidiSourceMap};
pub use error::{CatalogError, RoutingError};
pub use route::{Curve, CustomCurve, ModulationRoute, RouteId, RouteParams};
pub use routing::{ResolvedValues, RoutingTable};
pub use source::{SourceId, SourceTable};
pub use template::{Template, TemplateEntry, TemplateId, TemplateLibrary};

/// Hard limit on live routes in a routing table.
pub const MAX_ROUTES: usize = 32;
/// Largest source catalog a table accepts.
pub const MAX_SOURCES: usize = 24;
/// Largest destination catalog a table accepts.
pub const MAX_DESTINATIONS: usize = 64;
/// Default one-pole smoothing time constant in seconds.
pub const DEFAULT_SMOOTHING_TIME: f64 = 0.001;
