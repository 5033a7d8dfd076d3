//! Display settings and change notification.
//!
//! Settings are plain values held by a [`SettingsStore`]. Interested parties
//! register a callback with [`SettingsStore::subscribe`] and are called once
//! per effective change, after the new value is in place.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_AXIS_LABEL_FONT_SIZE, DEFAULT_MARKER_FONT_SIZE, DEFAULT_MARKER_RADIUS};
use crate::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Radius of the circle drawn for each marker, in pixels.
    pub marker_radius: f64,
    /// Font size of the number inside each marker.
    pub marker_font_size: f64,
    /// Font size of the two axis labels.
    pub axis_label_font_size: f64,
    /// Whether the center dividers are drawn.
    pub show_mid_axis: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            marker_radius: DEFAULT_MARKER_RADIUS,
            marker_font_size: DEFAULT_MARKER_FONT_SIZE,
            axis_label_font_size: DEFAULT_AXIS_LABEL_FONT_SIZE,
            show_mid_axis: true,
        }
    }
}

/// Sparse settings update. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_label_font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_mid_axis: Option<bool>,
}

/// A single effective settings change, delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsChange {
    MarkerRadius(f64),
    MarkerFontSize(f64),
    AxisLabelFontSize(f64),
    ShowMidAxis(bool),
}

/// Handle returned by [`SettingsStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&SettingsChange, &Settings) + Send>;

/// Current settings plus registered observers.
#[derive(Default)]
pub struct SettingsStore {
    current: Settings,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl SettingsStore {
    #[must_use]
    pub fn new(initial: Settings) -> Self {
        Self { current: initial, observers: Vec::new(), next_id: 0 }
    }

    #[must_use]
    pub fn current(&self) -> Settings {
        self.current
    }

    /// Register `observer` for future changes.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&SettingsChange, &Settings) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drop a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Apply `patch` and notify observers of each field that actually changed.
    ///
    /// The patch is validated as a whole before anything is applied.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] if a size is not a positive, finite number.
    #[allow(clippy::float_cmp)]
    pub fn apply(&mut self, patch: SettingsPatch) -> Result<Vec<SettingsChange>, BoardError> {
        validate_size("marker_radius", patch.marker_radius)?;
        validate_size("marker_font_size", patch.marker_font_size)?;
        validate_size("axis_label_font_size", patch.axis_label_font_size)?;

        let mut changes = Vec::new();
        if let Some(v) = patch.marker_radius.filter(|v| *v != self.current.marker_radius) {
            self.current.marker_radius = v;
            changes.push(SettingsChange::MarkerRadius(v));
        }
        if let Some(v) = patch.marker_font_size.filter(|v| *v != self.current.marker_font_size) {
            self.current.marker_font_size = v;
            changes.push(SettingsChange::MarkerFontSize(v));
        }
        if let Some(v) = patch.axis_label_font_size.filter(|v| *v != self.current.axis_label_font_size) {
            self.current.axis_label_font_size = v;
            changes.push(SettingsChange::AxisLabelFontSize(v));
        }
        if let Some(v) = patch.show_mid_axis.filter(|v| *v != self.current.show_mid_axis) {
            self.current.show_mid_axis = v;
            changes.push(SettingsChange::ShowMidAxis(v));
        }

        for change in &changes {
            for (_, observer) in &self.observers {
                observer(change, &self.current);
            }
        }
        Ok(changes)
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

fn validate_size(field: &str, value: Option<f64>) -> Result<(), BoardError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => {
            Err(BoardError::Validation(format!("{field} must be a positive number, got {v}")))
        }
        _ => Ok(()),
    }
}
