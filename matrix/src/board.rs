use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::codec;
use crate::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, ID_MAX_ATTEMPTS, STORAGE_BACKUP_KEY, STORAGE_KEY};
use crate::coords::{
    AxisGeometry, Position, default_position, pixel_to_value_x, pixel_to_value_y, value_to_pixel_x, value_to_pixel_y,
};
use crate::error::BoardError;
use crate::id::IdGenerator;
use crate::quadrant::{Classification, Quadrant, classify};
use crate::registry::{AxisPart, Marker, ShapeHandle, ShapeRegistry};
use crate::settings::{Settings, SettingsChange, SettingsPatch, SettingsStore};
use crate::storage::Storage;

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

/// A labeled marker on the board, as held in memory and in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityItem {
    /// Opaque id, unique for the lifetime of the board.
    pub id: String,
    /// Non-empty display title.
    pub title: String,
    /// Marker center in canvas pixels.
    pub position: Position,
}

/// Where a new item should land.
///
/// Axis values override the matching coordinate of `position` (or of the
/// canvas center when `position` is absent).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Placement {
    #[serde(default)]
    pub position: Option<Position>,
    /// Priority score in `[0, 10]`; sets y.
    #[serde(default)]
    pub priority: Option<f64>,
    /// Resources-required score in `[0, 10]`; sets x.
    #[serde(default)]
    pub resource: Option<f64>,
}

/// One row of the ranked list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub id: String,
    pub title: String,
    /// Number drawn inside the marker.
    pub label: usize,
    pub quadrant: Quadrant,
    pub position: Position,
    /// Priority score read back from the marker's y.
    pub priority: f64,
    /// Resources-required score read back from the marker's x.
    pub resource: f64,
}

/// Owns the items on the board and keeps the registry and ranking in step.
///
/// Every mutation runs to completion synchronously and leaves the item list,
/// the registry, and the classification consistent with each other.
pub struct PriorityBoard {
    items: Vec<PriorityItem>,
    registry: ShapeRegistry,
    ids: IdGenerator,
    retired: HashSet<String>,
    geometry: AxisGeometry,
    classification: Classification,
    settings: SettingsStore,
}

impl Default for PriorityBoard {
    fn default() -> Self {
        Self::build(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT, IdGenerator::new())
    }
}

impl PriorityBoard {
    /// Create an empty board for a `width × height` canvas.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] for non-positive or non-finite dimensions.
    pub fn new(width: f64, height: f64) -> Result<Self, BoardError> {
        Self::with_id_generator(width, height, IdGenerator::new())
    }

    /// Like [`PriorityBoard::new`] but with a caller-supplied id source.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] for non-positive or non-finite dimensions.
    pub fn with_id_generator(width: f64, height: f64, ids: IdGenerator) -> Result<Self, BoardError> {
        validate_dimensions(width, height)?;
        Ok(Self::build(width, height, ids))
    }

    fn build(width: f64, height: f64, ids: IdGenerator) -> Self {
        let mut registry = ShapeRegistry::new();
        for part in AxisPart::ALL {
            // Fresh registry: axis ids are distinct constants.
            if let Err(e) = registry.register(part.id(), ShapeHandle::Axis { part }) {
                warn!(error = %e, "axis shape registration failed");
            }
        }
        Self {
            items: Vec::new(),
            registry,
            ids,
            retired: HashSet::new(),
            geometry: AxisGeometry::from_canvas(width, height),
            classification: Classification::default(),
            settings: SettingsStore::default(),
        }
    }

    // --- Item intents ---

    /// Add a new item and return it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] for an empty title and
    /// [`BoardError::DuplicateId`] if no unused id could be generated.
    pub fn add_item(&mut self, title: &str, placement: Placement) -> Result<PriorityItem, BoardError> {
        let title = validate_title(title)?;
        let position = self.resolve_position(placement);
        let id = self.fresh_id()?;

        let label = self.items.len() + 1;
        let marker = Marker { position, label, radius: self.settings.current().marker_radius };
        self.registry.register(&id, ShapeHandle::Marker(marker))?;

        let item = PriorityItem { id, title, position };
        self.items.push(item.clone());
        self.reclassify();

        debug!(id = %item.id, x = position.x, y = position.y, "item added");
        Ok(item)
    }

    /// Move an item to `position`, clamped to the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] for an unknown id.
    pub fn move_item(&mut self, id: &str, position: Position) -> Result<PriorityItem, BoardError> {
        let position = position.clamped(self.width(), self.height());
        let item = self.item_mut(id)?;
        item.position = position;
        let moved = item.clone();

        self.sync_marker(id, |marker| marker.position = position);
        self.reclassify();

        debug!(%id, x = position.x, y = position.y, "item moved");
        Ok(moved)
    }

    /// Remove an item. Its id is retired and never handed out again.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] for an unknown id.
    pub fn remove_item(&mut self, id: &str) -> Result<PriorityItem, BoardError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| BoardError::NotFound(id.to_owned()))?;

        self.registry.unregister(id)?;
        let removed = self.items.remove(index);
        self.retired.insert(removed.id.clone());
        self.relabel();
        self.reclassify();

        debug!(%id, remaining = self.items.len(), "item removed");
        Ok(removed)
    }

    /// Change an item's title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] for an empty title and
    /// [`BoardError::NotFound`] for an unknown id.
    pub fn rename_item(&mut self, id: &str, title: &str) -> Result<PriorityItem, BoardError> {
        let title = validate_title(title)?;
        let item = self.item_mut(id)?;
        item.title = title;
        let renamed = item.clone();
        if !self.classification.retitle(id, &renamed.title) {
            warn!(%id, "renamed item missing from classification");
            self.reclassify();
        }

        debug!(%id, "item renamed");
        Ok(renamed)
    }

    // --- Canvas ---

    /// Rebuild the axis geometry for a new canvas size.
    ///
    /// Items keep their pixel positions; only those now outside the canvas
    /// are pulled back onto its edge.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] for non-positive or non-finite dimensions.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), BoardError> {
        validate_dimensions(width, height)?;
        self.geometry = AxisGeometry::from_canvas(width, height);

        let mut clamped = Vec::new();
        for item in &mut self.items {
            let inside = item.position.clamped(width, height);
            if inside != item.position {
                item.position = inside;
                clamped.push((item.id.clone(), inside));
            }
        }
        for (id, position) in &clamped {
            self.sync_marker(id, |marker| marker.position = *position);
        }
        self.reclassify();

        debug!(width, height, clamped = clamped.len(), "canvas resized");
        Ok(())
    }

    // --- Persistence ---

    /// Encode the current items for storage.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Malformed`] if encoding fails.
    pub fn save(&self) -> Result<String, BoardError> {
        Ok(codec::encode(&self.items)?)
    }

    /// Replace the board contents with a previously saved document.
    ///
    /// On failure the board is left empty, never partially populated.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Malformed`] for undecodable data and
    /// [`BoardError::DuplicateId`] if a stored id collides with an axis shape.
    pub fn restore(&mut self, raw: &str) -> Result<usize, BoardError> {
        self.clear();

        let decoded = match codec::decode(raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "stored board is malformed; starting empty");
                return Err(e.into());
            }
        };

        let (width, height) = (self.width(), self.height());
        let radius = self.settings.current().marker_radius;
        for (index, mut item) in decoded.into_iter().enumerate() {
            item.position = item.position.clamped(width, height);
            let marker = Marker { position: item.position, label: index + 1, radius };
            if let Err(e) = self.registry.register(&item.id, ShapeHandle::Marker(marker)) {
                warn!(error = %e, "stored board conflicts with axis shapes; starting empty");
                self.clear();
                return Err(e);
            }
            self.items.push(item);
        }
        self.reclassify();

        debug!(count = self.items.len(), "board restored");
        Ok(self.items.len())
    }

    /// Write the current items under the board's storage key.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Storage`] if the backend write fails.
    pub fn save_to(&self, storage: &dyn Storage) -> Result<(), BoardError> {
        let raw = self.save()?;
        storage.set(STORAGE_KEY, &raw)?;
        debug!(count = self.items.len(), "board saved");
        Ok(())
    }

    /// Load items from the board's storage key. A missing key means an empty board.
    ///
    /// A document that cannot be restored is copied to [`STORAGE_BACKUP_KEY`]
    /// first, so the next save does not destroy the only copy.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Storage`] if the backend read fails, otherwise
    /// whatever [`PriorityBoard::restore`] returns.
    pub fn restore_from(&mut self, storage: &dyn Storage) -> Result<usize, BoardError> {
        let Some(raw) = storage.get(STORAGE_KEY)? else {
            self.clear();
            return Ok(0);
        };
        self.restore(&raw).inspect_err(|_| {
            if let Err(e) = preserve_unrestorable(storage, &raw) {
                error!(error = %e, "could not back up unrestorable board");
            }
        })
    }

    // --- Settings ---

    /// Apply a settings patch and propagate marker changes to the registry.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] for invalid sizes.
    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<Vec<SettingsChange>, BoardError> {
        let changes = self.settings.apply(patch)?;
        for change in &changes {
            if let SettingsChange::MarkerRadius(radius) = *change {
                let ids: Vec<String> = self.items.iter().map(|item| item.id.clone()).collect();
                for id in &ids {
                    self.sync_marker(id, |marker| marker.radius = radius);
                }
            }
        }
        Ok(changes)
    }

    /// Settings store, for registering observers.
    pub fn settings_mut(&mut self) -> &mut SettingsStore {
        &mut self.settings
    }

    // --- Queries ---

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings.current()
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[PriorityItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, id: &str) -> Option<&PriorityItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// 1-based list number of an item, as drawn inside its marker.
    #[must_use]
    pub fn label_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id).map(|i| i + 1)
    }

    /// Item ids in ranked order.
    #[must_use]
    pub fn ranked_order(&self) -> Vec<String> {
        self.classification.ranked_order()
    }

    /// Items bucketed by quadrant.
    #[must_use]
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Rows for the ranked list view.
    #[must_use]
    pub fn ranked_entries(&self) -> Vec<RankedEntry> {
        self.classification
            .ranked()
            .map(|(quadrant, item)| RankedEntry {
                id: item.id.clone(),
                title: item.title.clone(),
                label: self.label_of(&item.id).unwrap_or_default(),
                quadrant,
                position: item.position,
                priority: pixel_to_value_y(item.position.y, &self.geometry.y_axis),
                resource: pixel_to_value_x(item.position.x, &self.geometry.x_axis),
            })
            .collect()
    }

    #[must_use]
    pub fn axis_geometry(&self) -> &AxisGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.geometry.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.geometry.height
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // --- Internals ---

    fn resolve_position(&self, placement: Placement) -> Position {
        let (width, height) = (self.width(), self.height());
        let base = placement
            .position
            .unwrap_or_else(|| default_position(width, height));
        let x = placement
            .resource
            .map_or(base.x, |v| value_to_pixel_x(v, &self.geometry.x_axis));
        let y = placement
            .priority
            .map_or(base.y, |v| value_to_pixel_y(v, &self.geometry.y_axis));
        Position::new(x, y).clamped(width, height)
    }

    fn fresh_id(&mut self) -> Result<String, BoardError> {
        let mut last = String::new();
        for _ in 0..ID_MAX_ATTEMPTS {
            let id = self.ids.generate_default();
            if !self.retired.contains(&id) && !self.registry.contains(&id) {
                return Ok(id);
            }
            warn!(%id, "generated id already used; regenerating");
            last = id;
        }
        Err(BoardError::DuplicateId(last))
    }

    fn item_mut(&mut self, id: &str) -> Result<&mut PriorityItem, BoardError> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| BoardError::NotFound(id.to_owned()))
    }

    fn sync_marker(&mut self, id: &str, update: impl FnOnce(&mut Marker)) {
        match self.registry.get_mut(id).and_then(ShapeHandle::as_marker_mut) {
            Some(marker) => update(marker),
            None => warn!(%id, "item has no registered marker"),
        }
    }

    fn relabel(&mut self) {
        let labels: Vec<(String, usize)> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.id.clone(), i + 1))
            .collect();
        for (id, label) in &labels {
            self.sync_marker(id, |marker| marker.label = *label);
        }
    }

    fn reclassify(&mut self) {
        self.classification = classify(&self.items, self.width(), self.height());
    }

    /// Drop every item, retiring their ids.
    fn clear(&mut self) {
        self.retired.extend(self.items.drain(..).map(|item| item.id));
        self.registry.clear_markers();
        self.classification = Classification::default();
    }
}

/// Copy a document that failed to restore to [`STORAGE_BACKUP_KEY`].
///
/// # Errors
///
/// Returns [`BoardError::Storage`] if the backend write fails.
pub fn preserve_unrestorable(storage: &dyn Storage, raw: &str) -> Result<(), BoardError> {
    storage.set(STORAGE_BACKUP_KEY, raw)?;
    warn!(key = STORAGE_BACKUP_KEY, bytes = raw.len(), "unrestorable board preserved");
    Ok(())
}

/// Titles are stored as given; whitespace-only counts as empty.
fn validate_title(title: &str) -> Result<String, BoardError> {
    if title.trim().is_empty() {
        return Err(BoardError::Validation("title must not be empty".into()));
    }
    Ok(title.to_owned())
}

fn validate_dimensions(width: f64, height: f64) -> Result<(), BoardError> {
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(BoardError::Validation(format!("canvas must be positive, got {width}x{height}")));
    }
    Ok(())
}
