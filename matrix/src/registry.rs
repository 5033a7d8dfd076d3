//! Registry of drawn shapes keyed by id.
//!
//! The registry is the engine's answer to "what is on the board". It holds
//! one [`ShapeHandle`] per id: a marker for every priority item, plus the
//! structural axis shapes that share the same id space but never take part
//! in ranking. Handles are typed, so callers filter by variant instead of by
//! class-name strings.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::coords::Position;
use crate::error::BoardError;

/// Structural pieces of the axis drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPart {
    XLine,
    YLine,
    MidVertical,
    MidHorizontal,
    XLabel,
    YLabel,
}

impl AxisPart {
    /// Every axis part, in drawing order.
    pub const ALL: [AxisPart; 6] =
        [Self::XLine, Self::YLine, Self::MidVertical, Self::MidHorizontal, Self::XLabel, Self::YLabel];

    /// Registry id reserved for this part.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::XLine => "xAxisLine",
            Self::YLine => "yAxisLine",
            Self::MidVertical => "midAxisVertical",
            Self::MidHorizontal => "midAxisHorizontal",
            Self::XLabel => "xAxisLabel",
            Self::YLabel => "yAxisLabel",
        }
    }
}

/// Drawn group for one priority item: a circle with its list number inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Position,
    /// 1-based number shown inside the circle.
    pub label: usize,
    pub radius: f64,
}

/// A registered shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeHandle {
    Marker(Marker),
    Axis { part: AxisPart },
}

impl ShapeHandle {
    /// Structural shapes are excluded from ranking.
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Self::Axis { .. })
    }

    #[must_use]
    pub fn as_marker(&self) -> Option<&Marker> {
        match self {
            Self::Marker(marker) => Some(marker),
            Self::Axis { .. } => None,
        }
    }

    pub fn as_marker_mut(&mut self) -> Option<&mut Marker> {
        match self {
            Self::Marker(marker) => Some(marker),
            Self::Axis { .. } => None,
        }
    }
}

/// Id → handle map owned by the board.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    shapes: HashMap<String, ShapeHandle>,
}

impl ShapeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { shapes: HashMap::new() }
    }

    /// Store a handle under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateId`] if `id` is already registered. The
    /// existing entry is left untouched.
    pub fn register(&mut self, id: &str, handle: ShapeHandle) -> Result<(), BoardError> {
        if self.shapes.contains_key(id) {
            return Err(BoardError::DuplicateId(id.to_owned()));
        }
        self.shapes.insert(id.to_owned(), handle);
        Ok(())
    }

    /// Remove and return the handle under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] if `id` is not registered.
    pub fn unregister(&mut self, id: &str) -> Result<ShapeHandle, BoardError> {
        self.shapes
            .remove(id)
            .ok_or_else(|| BoardError::NotFound(id.to_owned()))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ShapeHandle> {
        self.shapes.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ShapeHandle> {
        self.shapes.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.shapes.contains_key(id)
    }

    /// Every registered shape, sorted by id so output is stable.
    #[must_use]
    pub fn all(&self) -> Vec<(&str, &ShapeHandle)> {
        let mut shapes: Vec<(&str, &ShapeHandle)> = self.shapes.iter().map(|(id, h)| (id.as_str(), h)).collect();
        shapes.sort_by(|a, b| a.0.cmp(b.0));
        shapes
    }

    /// Every marker, skipping structural axis shapes.
    #[must_use]
    pub fn all_excluding_system_items(&self) -> Vec<(&str, &Marker)> {
        self.all()
            .into_iter()
            .filter_map(|(id, handle)| handle.as_marker().map(|marker| (id, marker)))
            .collect()
    }

    /// Drop every marker, keeping the axis shapes.
    pub fn clear_markers(&mut self) {
        self.shapes.retain(|_, handle| handle.is_system());
    }

    /// Number of registered shapes, structural ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of registered markers.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.shapes.values().filter(|h| !h.is_system()).count()
    }
}
