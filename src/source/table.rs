use crate::{
    error::{check_catalog, CatalogError, RoutingError},
    source::{catalog::BUILTIN_SOURCES, ModulationSource, SourceId},
    MAX_SOURCES,
};

/// Every modulation source known to the engine, indexed by `SourceId`.
///
/// Built once at startup and never resized. `push_value` records raw input,
/// `tick` advances smoothing, and routes read `value_of`.
#[derive(Debug, Clone)]
pub struct SourceTable {
    sources: Vec<ModulationSource>,
}

impl SourceTable {
    /// The built-in catalog with one shared time constant.
    pub fn builtin(time_constant: f64) -> Self {
        Self::build(BUILTIN_SOURCES, time_constant)
    }

    /// A custom catalog. Names must be unique and non-empty, at most
    /// `MAX_SOURCES` of them.
    pub fn from_names(names: &[&str], time_constant: f64) -> Result<Self, CatalogError> {
        check_catalog(names, MAX_SOURCES)?;
        Ok(Self::build(names, time_constant))
    }

    fn build(names: &[&str], time_constant: f64) -> Self {
        let sources = names
            .iter()
            .enumerate()
            .map(|(i, name)| ModulationSource::new(SourceId(i as u8), name, time_constant))
            .collect();

        Self { sources }
    }

    /// Record the latest raw value. Smoothing picks it up on the next `tick`.
    ///
    /// Non-finite values are dropped so one bad sample cannot poison the
    /// filter state for the rest of the session.
    pub fn push_value(&mut self, id: SourceId, raw: f64) -> Result<(), RoutingError> {
        let source = self
            .sources
            .get_mut(id.index())
            .ok_or(RoutingError::UnknownSource)?;

        if raw.is_finite() {
            source.raw = raw;
        } else {
            log::warn!("dropping non-finite value {raw} for source {}", source.name);
        }
        Ok(())
    }

    /// Advance every source's smoother by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        for source in &mut self.sources {
            source.smoother.tick(source.raw, dt);
        }
    }

    /// Current smoothed value.
    #[inline]
    pub fn value_of(&self, id: SourceId) -> Result<f64, RoutingError> {
        self.sources
            .get(id.index())
            .map(ModulationSource::smoothed_value)
            .ok_or(RoutingError::UnknownSource)
    }

    pub fn raw_value_of(&self, id: SourceId) -> Result<f64, RoutingError> {
        self.sources
            .get(id.index())
            .map(ModulationSource::raw_value)
            .ok_or(RoutingError::UnknownSource)
    }

    /// Override the time constant of one source. `<= 0` makes it instant.
    pub fn set_time_constant(&mut self, id: SourceId, seconds: f64) -> Result<(), RoutingError> {
        let source = self
            .sources
            .get_mut(id.index())
            .ok_or(RoutingError::UnknownSource)?;
        source.smoother.set_time_constant(seconds);
        Ok(())
    }

    /// Jump the smoothed value to the raw value, skipping the glide.
    pub fn snap(&mut self, id: SourceId) -> Result<(), RoutingError> {
        let source = self
            .sources
            .get_mut(id.index())
            .ok_or(RoutingError::UnknownSource)?;
        source.smoother.reset(source.raw);
        Ok(())
    }

    pub fn snap_all(&mut self) {
        for source in &mut self.sources {
            source.smoother.reset(source.raw);
        }
    }

    pub fn source(&self, id: SourceId) -> Option<&ModulationSource> {
        self.sources.get(id.index())
    }

    /// Look up a source by name, ignoring ASCII case.
    pub fn id_of(&self, name: &str) -> Option<SourceId> {
        self.sources
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| s.id)
    }

    pub fn name_of(&self, id: SourceId) -> Option<&str> {
        self.sources.get(id.index()).map(|s| s.name.as_str())
    }

    pub fn contains(&self, id: SourceId) -> bool {
        id.index() < self.sources.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModulationSource> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceTable {
    fn default() -> Self {
        Self::builtin(crate::DEFAULT_SMOOTHING_TIME)
    }
}
