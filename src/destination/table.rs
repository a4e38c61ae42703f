use crate::{
    destination::{
        catalog::BUILTIN_DESTINATIONS, DestinationId, DestinationMetadata, ModulationDestination,
    },
    error::{check_catalog, CatalogError, RoutingError},
    MAX_DESTINATIONS,
};

/// Every routable destination with its derived metadata. Immutable after
/// construction.
#[derive(Debug, Clone)]
pub struct DestinationTable {
    destinations: Vec<ModulationDestination>,
}

impl DestinationTable {
    pub fn builtin() -> Self {
        Self::build(BUILTIN_DESTINATIONS)
    }

    pub fn from_names(names: &[&str]) -> Result<Self, CatalogError> {
        check_catalog(names, MAX_DESTINATIONS)?;
        Ok(Self::build(names))
    }

    fn build(names: &[&str]) -> Self {
        let destinations = names
            .iter()
            .enumerate()
            .map(|(i, name)| ModulationDestination {
                id: DestinationId(i as u8),
                name: name.to_string(),
                metadata: DestinationMetadata::for_name(name),
            })
            .collect();

        Self { destinations }
    }

    pub fn metadata_of(&self, id: DestinationId) -> Result<&DestinationMetadata, RoutingError> {
        self.destinations
            .get(id.index())
            .map(|d| &d.metadata)
            .ok_or(RoutingError::UnknownDestination)
    }

    #[inline]
    pub fn default_of(&self, id: DestinationId) -> Result<f64, RoutingError> {
        self.metadata_of(id).map(|m| m.default)
    }

    pub fn destination(&self, id: DestinationId) -> Option<&ModulationDestination> {
        self.destinations.get(id.index())
    }

    /// Look up a destination by name, ignoring ASCII case.
    pub fn id_of(&self, name: &str) -> Option<DestinationId> {
        self.destinations
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .map(|d| d.id)
    }

    pub fn name_of(&self, id: DestinationId) -> Option<&str> {
        self.destinations.get(id.index()).map(|d| d.name.as_str())
    }

    pub fn contains(&self, id: DestinationId) -> bool {
        id.index() < self.destinations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModulationDestination> {
        self.destinations.iter()
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

impl Default for DestinationTable {
    fn default() -> Self {
        Self::builtin()
    }
}
