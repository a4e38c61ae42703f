use crate::{
    destination::{DestinationId, DestinationTable},
    error::RoutingError,
    route::{clamp_amount, sanitize_multiplier, Curve, CustomCurve, ModulationRoute, RouteId, RouteParams},
    routing::ResolvedValues,
    source::{SourceId, SourceTable},
    MAX_ROUTES,
};

/// Owner of every live route, with a per-destination index.
///
/// All storage is allocated up front; adding, removing, editing and
/// resolving never allocate.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingTable {
    slots: [Option<ModulationRoute>; MAX_ROUTES],
    order: Vec<usize>,               // occupied slots in insertion order
    by_destination: Vec<Vec<usize>>, // slots per destination, insertion order
    source_count: usize,
    next_id: u32,
}

impl RoutingTable {
    /// An empty table accepting ids below the given catalog sizes.
    pub fn new(source_count: usize, destination_count: usize) -> Self {
        Self {
            slots: [None; MAX_ROUTES],
            order: Vec::with_capacity(MAX_ROUTES),
            by_destination: (0..destination_count)
                .map(|_| Vec::with_capacity(MAX_ROUTES))
                .collect(),
            source_count,
            next_id: 1,
        }
    }

    /// An empty table sized for these catalogs.
    pub fn for_tables(sources: &SourceTable, destinations: &DestinationTable) -> Self {
        Self::new(sources.len(), destinations.len())
    }

    /// Check that both ids fall inside the catalogs this table was sized for.
    pub fn check_ids(&self, source: SourceId, destination: DestinationId) -> Result<(), RoutingError> {
        if source.index() >= self.source_count {
            return Err(RoutingError::UnknownSource);
        }
        if destination.index() >= self.by_destination.len() {
            return Err(RoutingError::UnknownDestination);
        }
        Ok(())
    }

    /// Check that a route for this pair could be added right now.
    pub fn check_add(&self, source: SourceId, destination: DestinationId) -> Result<(), RoutingError> {
        self.check_ids(source, destination)?;
        if self.find(source, destination).is_some() {
            return Err(RoutingError::DuplicateRoute);
        }
        if self.is_full() {
            return Err(RoutingError::CapacityExceeded);
        }
        Ok(())
    }

    /// Connect `source` to `destination`.
    pub fn add_route(
        &mut self,
        source: SourceId,
        destination: DestinationId,
        params: RouteParams,
    ) -> Result<RouteId, RoutingError> {
        self.check_add(source, destination)?;

        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(RoutingError::CapacityExceeded)?;

        let id = RouteId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1).max(1);

        self.slots[slot] = Some(ModulationRoute::new(id, source, destination, params));
        self.order.push(slot);
        self.by_destination[destination.index()].push(slot);

        log::debug!("route {id} added: {source} -> {destination}");
        Ok(id)
    }

    /// Disconnect a route and return it.
    pub fn remove_route(&mut self, id: RouteId) -> Result<ModulationRoute, RoutingError> {
        let slot = self.slot_of(id)?;
        let route = self.slots[slot].take().ok_or(RoutingError::UnknownRoute(id))?;

        if let Some(pos) = self.order.iter().position(|&s| s == slot) {
            self.order.remove(pos);
        }
        let index = &mut self.by_destination[route.destination.index()];
        if let Some(pos) = index.iter().position(|&s| s == slot) {
            index.remove(pos);
        }

        log::debug!("route {id} removed");
        Ok(route)
    }

    /// Set the amount, clamped to [-1, 1].
    pub fn set_amount(&mut self, id: RouteId, amount: f64) -> Result<(), RoutingError> {
        self.route_mut(id)?.amount = clamp_amount(amount);
        Ok(())
    }

    pub fn set_curve(&mut self, id: RouteId, curve: Curve) -> Result<(), RoutingError> {
        self.route_mut(id)?.curve = curve;
        Ok(())
    }

    pub fn set_enabled(&mut self, id: RouteId, enabled: bool) -> Result<(), RoutingError> {
        self.route_mut(id)?.enabled = enabled;
        Ok(())
    }

    pub fn set_bipolar(&mut self, id: RouteId, bipolar: bool) -> Result<(), RoutingError> {
        self.route_mut(id)?.bipolar = bipolar;
        Ok(())
    }

    /// Scale applied to the source before the curve. Non-finite values
    /// fall back to 1.
    pub fn set_source_multiplier(&mut self, id: RouteId, multiplier: f64) -> Result<(), RoutingError> {
        self.route_mut(id)?.source_multiplier = sanitize_multiplier(multiplier);
        Ok(())
    }

    /// Supply (or drop) the breakpoint table used when the curve is `Custom`.
    pub fn set_custom_curve(&mut self, id: RouteId, table: Option<CustomCurve>) -> Result<(), RoutingError> {
        self.route_mut(id)?.custom_curve = table;
        Ok(())
    }

    /// Default plus the sum of every enabled route on `destination`.
    /// Not clamped to the destination's range. A route whose source is
    /// missing from `sources` reads 0, the same as in
    /// [`resolve_all_into`](Self::resolve_all_into).
    pub fn resolve(
        &self,
        destination: DestinationId,
        sources: &SourceTable,
        destinations: &DestinationTable,
    ) -> Result<f64, RoutingError> {
        let default = destinations.default_of(destination)?;
        let index = self
            .by_destination
            .get(destination.index())
            .ok_or(RoutingError::UnknownDestination)?;

        let mut sum = 0.0;
        for route in index.iter().filter_map(|&slot| self.slots[slot].as_ref()) {
            if route.enabled {
                sum += route.evaluate(sources.value_of(route.source).unwrap_or(0.0));
            }
        }
        Ok(default + sum)
    }

    /// Resolve every destination into `out`. Unrouted destinations get their
    /// default without touching the route arena. Stale sources read 0.
    pub fn resolve_all_into(
        &self,
        out: &mut ResolvedValues,
        sources: &SourceTable,
        destinations: &DestinationTable,
    ) {
        out.reset(destinations.len());

        for dest in destinations.iter() {
            let default = dest.metadata.default;
            let index = match self.by_destination.get(dest.id.index()) {
                Some(index) if !index.is_empty() => index,
                _ => {
                    out.set(dest.id, default);
                    continue;
                }
            };

            let sum: f64 = index
                .iter()
                .filter_map(|&slot| self.slots[slot].as_ref())
                .filter(|route| route.enabled)
                .map(|route| route.evaluate(sources.value_of(route.source).unwrap_or(0.0)))
                .sum();
            out.set(dest.id, default + sum);
        }
    }

    pub fn resolve_all(&self, sources: &SourceTable, destinations: &DestinationTable) -> ResolvedValues {
        let mut out = ResolvedValues::new();
        self.resolve_all_into(&mut out, sources, destinations);
        out
    }

    /// Drop every route. Ids handed out before stay retired.
    pub fn clear(&mut self) {
        self.slots = [None; MAX_ROUTES];
        self.order.clear();
        for index in &mut self.by_destination {
            index.clear();
        }
    }

    pub fn route(&self, id: RouteId) -> Option<&ModulationRoute> {
        self.slot_of(id).ok().and_then(|slot| self.slots[slot].as_ref())
    }

    /// Routes in the order they were added.
    pub fn routes(&self) -> impl Iterator<Item = &ModulationRoute> + '_ {
        self.order.iter().filter_map(|&slot| self.slots[slot].as_ref())
    }

    /// Routes targeting `destination`, in the order they were added.
    pub fn routes_for(&self, destination: DestinationId) -> impl Iterator<Item = &ModulationRoute> + '_ {
        self.by_destination
            .get(destination.index())
            .into_iter()
            .flatten()
            .filter_map(|&slot| self.slots[slot].as_ref())
    }

    /// The route connecting this pair, if any.
    pub fn find(&self, source: SourceId, destination: DestinationId) -> Option<&ModulationRoute> {
        self.routes_for(destination).find(|r| r.source == source)
    }

    pub fn route_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_full(&self) -> bool {
        self.order.len() >= MAX_ROUTES
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        MAX_ROUTES
    }

    fn slot_of(&self, id: RouteId) -> Result<usize, RoutingError> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|r| r.id == id))
            .ok_or(RoutingError::UnknownRoute(id))
    }

    fn route_mut(&mut self, id: RouteId) -> Result<&mut ModulationRoute, RoutingError> {
        let slot = self.slot_of(id)?;
        self.slots[slot].as_mut().ok_or(RoutingError::UnknownRoute(id))
    }
}
