use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    destination::{DestinationId, DestinationTable},
    error::RoutingError,
    routing::RoutingTable,
    source::{SourceId, SourceTable},
    template::{builtin::builtin_templates, Template, TemplateEntry},
    MAX_ROUTES,
};

/// Position of a template inside its library. Stable until the library is
/// rebuilt; re-registering a name keeps its id.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(pub u16);

impl TemplateId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Registered templates, looked up by case-insensitive name.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
}

impl TemplateLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// A library preloaded with the factory templates.
    pub fn with_builtins() -> Self {
        let mut library = Self::new();
        for template in builtin_templates() {
            library.register(template);
        }
        library
    }

    /// Add a template, replacing any existing one with the same name.
    pub fn register(&mut self, template: Template) -> TemplateId {
        if let Some(id) = self.id_of(&template.name) {
            log::debug!("template {:?} replaced", template.name);
            self.templates[id.index()] = template;
            return id;
        }
        self.templates.push(template);
        TemplateId((self.templates.len() - 1) as u16)
    }

    pub fn id_of(&self, name: &str) -> Option<TemplateId> {
        self.templates
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name.trim()))
            .map(|i| TemplateId(i as u16))
    }

    pub fn get(&self, id: TemplateId) -> Option<&Template> {
        self.templates.get(id.index())
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Template> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.templates.iter().map(|t| t.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (TemplateId, &Template)> + '_ {
        self.templates
            .iter()
            .enumerate()
            .map(|(i, t)| (TemplateId(i as u16), t))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Replace every route in `routing` with the named template's routes.
    /// Returns how many routes were installed.
    pub fn load(
        &self,
        name: &str,
        routing: &mut RoutingTable,
        sources: &SourceTable,
        destinations: &DestinationTable,
    ) -> Result<usize, RoutingError> {
        let id = self.id_of(name).ok_or(RoutingError::UnknownTemplate)?;
        self.load_id(id, routing, sources, destinations)
    }

    /// As [`load`](Self::load), by id.
    ///
    /// All-or-nothing: the whole template is validated against the catalogs
    /// before the table is touched, so on error `routing` is unchanged.
    pub fn load_id(
        &self,
        id: TemplateId,
        routing: &mut RoutingTable,
        sources: &SourceTable,
        destinations: &DestinationTable,
    ) -> Result<usize, RoutingError> {
        let template = self.get(id).ok_or(RoutingError::UnknownTemplate)?;
        validate(template, routing, sources, destinations)?;

        routing.clear();
        for entry in &template.entries {
            let (source, destination) = resolve_entry(entry, sources, destinations)?;
            routing.add_route(source, destination, entry.params())?;
        }

        log::debug!(
            "template {:?} loaded with {} routes",
            template.name,
            template.entries.len()
        );
        Ok(template.entries.len())
    }
}

fn resolve_entry(
    entry: &TemplateEntry,
    sources: &SourceTable,
    destinations: &DestinationTable,
) -> Result<(SourceId, DestinationId), RoutingError> {
    let source = sources.id_of(&entry.source).ok_or(RoutingError::UnknownSource)?;
    let destination = destinations
        .id_of(&entry.destination)
        .ok_or(RoutingError::UnknownDestination)?;
    Ok((source, destination))
}

// Everything `add_route` could refuse once the table is empty.
fn validate(
    template: &Template,
    routing: &RoutingTable,
    sources: &SourceTable,
    destinations: &DestinationTable,
) -> Result<(), RoutingError> {
    for (i, entry) in template.entries.iter().enumerate() {
        let pair = resolve_entry(entry, sources, destinations)?;
        routing.check_ids(pair.0, pair.1)?;

        for earlier in &template.entries[..i] {
            if resolve_entry(earlier, sources, destinations)? == pair {
                return Err(RoutingError::DuplicateRoute);
            }
        }
    }

    if template.entries.len() > MAX_ROUTES {
        return Err(RoutingError::CapacityExceeded);
    }
    Ok(())
}
