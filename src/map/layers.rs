//! Active basemap tracking.

use super::basemap::BasemapDefinition;
use super::engine::MapEngine;
use super::error::MapError;

/// Holds the basemap catalog and the one layer currently attached.
///
/// At most one layer is attached at any time. Switching always detaches the
/// old layer before attaching the new one.
pub struct LayerRegistry<L> {
    catalog: &'static [BasemapDefinition],
    active_index: usize,
    active: Option<L>,
}

impl<L> LayerRegistry<L> {
    pub fn new(catalog: &'static [BasemapDefinition]) -> Self {
        Self {
            catalog,
            active_index: 0,
            active: None,
        }
    }

    pub fn catalog(&self) -> &'static [BasemapDefinition] {
        self.catalog
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_definition(&self) -> &'static BasemapDefinition {
        &self.catalog[self.active_index]
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.active.is_some()
    }

    /// Attaches the default basemap (index 0) to a freshly adopted engine.
    pub fn attach_default<E>(&mut self, engine: &mut E)
    where
        E: MapEngine<Layer = L>,
    {
        self.detach(engine);
        self.active_index = 0;
        self.attach(engine);
    }

    /// Switches the attached basemap.
    ///
    /// Returns `Ok(false)` when `index` is already attached; nothing is
    /// detached or re-attached in that case.
    pub fn switch<E>(&mut self, engine: &mut E, index: usize) -> Result<bool, MapError>
    where
        E: MapEngine<Layer = L>,
    {
        if index >= self.catalog.len() {
            return Err(MapError::LayerOutOfRange {
                index,
                len: self.catalog.len(),
            });
        }

        if index == self.active_index && self.active.is_some() {
            return Ok(false);
        }

        self.detach(engine);
        self.active_index = index;
        self.attach(engine);
        Ok(true)
    }

    /// Detaches the active layer, if any.
    pub fn detach<E>(&mut self, engine: &mut E)
    where
        E: MapEngine<Layer = L>,
    {
        if let Some(layer) = self.active.take() {
            engine.remove_layer(layer);
        }
    }

    fn attach<E>(&mut self, engine: &mut E)
    where
        E: MapEngine<Layer = L>,
    {
        let definition = self.active_definition();
        log::debug!("Attaching basemap: {}", definition.name);
        self.active = Some(engine.add_tile_layer(definition.url_template, definition.max_zoom));
    }
}
