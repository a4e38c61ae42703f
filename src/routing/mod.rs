//! Route storage and per-destination resolution.

/*
Resolving a Destination
=======================

Every control tick the audio engine asks: "what value should FILTER1
CUTOFF have right now?" The answer is the destination's default plus the
sum of every route pointing at it:

    resolved(d) = default(d) + Σ route.evaluate(value_of(route.source))
                               routes r with r.destination = d

Example, FILTER1 CUTOFF (default 1000 Hz):

    LFO 1  ─[exp, 0.5]─┐
                       ├──▶ 1000 + 0.32 + 0.20 = 1000.52
    ENV 2  ─[lin, 0.4]─┘

No clamping happens here. Several modulators may push a value far outside
the declared range for a moment and cancel out later, so the sum keeps its
headroom and the audio engine clamps when it applies the value.


Index by Destination
--------------------

Routes live in a fixed arena of MAX_ROUTES slots. Next to it sits one
list of slot numbers per destination. Resolving a destination walks only
its own list, so the cost is the number of routes on that destination, and
a destination with no routes costs nothing beyond reading its default.

    slots:          [ r0 | r1 | -- | r3 | ... ]   (MAX_ROUTES)
    by_destination: D0 → [0, 3]
                    D1 → []
                    D2 → [1]

Every mutation updates both structures together, and every check runs
before anything is touched, so a refused request leaves the table exactly
as it was.
*/

/// Flat buffer of resolved values, one per destination.
pub mod resolved;
/// The routing table itself.
pub mod table;

pub use resolved::ResolvedValues;
pub use table::RoutingTable;
