//! Positions, axis geometry, and conversions between axis values and pixels.
//!
//! Semantic axis values live in `[0, 10]`. The x axis ("Resources Required")
//! grows to the right. The y axis ("Priority") is inverted: a higher value
//! sits closer to the top of the canvas, i.e. at a smaller pixel y.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    AXIS_END_RATIO, AXIS_LABEL_OFFSET_RATIO, AXIS_START_RATIO, AXIS_VALUE_MAX, X_AXIS_LABEL, Y_AXIS_LABEL,
};

/// A point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp into `[0, width] × [0, height]`. NaN coordinates collapse to 0.
    #[must_use]
    pub fn clamped(self, width: f64, height: f64) -> Self {
        Self { x: clamp_or_zero(self.x, 0.0, width), y: clamp_or_zero(self.y, 0.0, height) }
    }
}

/// Placement of one axis along its canvas dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Pixel coordinate where the axis starts.
    pub origin_pixel: f64,
    /// Pixel length of the axis.
    pub length_pixel: f64,
}

impl AxisConfig {
    /// Axis spanning `AXIS_START_RATIO..AXIS_END_RATIO` of `dimension`.
    #[must_use]
    pub fn for_dimension(dimension: f64) -> Self {
        let origin_pixel = dimension * AXIS_START_RATIO;
        Self { origin_pixel, length_pixel: dimension * AXIS_END_RATIO - origin_pixel }
    }

    /// Pixel coordinate where the axis ends.
    #[must_use]
    pub fn end_pixel(&self) -> f64 {
        self.origin_pixel + self.length_pixel
    }

    /// Pixels per unit of axis value.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.length_pixel / AXIS_VALUE_MAX
    }
}

/// A straight line between two canvas points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Position,
    pub to: Position,
}

/// Where an axis label is anchored and what it says.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub text: String,
    pub anchor: Position,
}

/// Everything the host needs to draw the axes for the current canvas size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisGeometry {
    pub width: f64,
    pub height: f64,
    /// Horizontal "Resources Required" axis.
    pub x_axis: AxisConfig,
    /// Vertical "Priority" axis.
    pub y_axis: AxisConfig,
    pub x_line: Segment,
    pub y_line: Segment,
    /// Vertical divider through the canvas center.
    pub mid_vertical: Segment,
    /// Horizontal divider through the canvas center.
    pub mid_horizontal: Segment,
    pub x_label: AxisLabel,
    pub y_label: AxisLabel,
}

impl AxisGeometry {
    /// Derive the axis layout from canvas dimensions.
    #[must_use]
    pub fn from_canvas(width: f64, height: f64) -> Self {
        let x_axis = AxisConfig::for_dimension(width);
        let y_axis = AxisConfig::for_dimension(height);

        // The x axis runs along the bottom of the priority range.
        let baseline = y_axis.end_pixel();
        let x_line = Segment {
            from: Position::new(x_axis.origin_pixel, baseline),
            to: Position::new(x_axis.end_pixel(), baseline),
        };
        let y_line = Segment {
            from: Position::new(x_axis.origin_pixel, y_axis.origin_pixel),
            to: Position::new(x_axis.origin_pixel, baseline),
        };

        let center = default_position(width, height);
        let mid_vertical = Segment {
            from: Position::new(center.x, y_axis.origin_pixel),
            to: Position::new(center.x, baseline),
        };
        let mid_horizontal = Segment {
            from: Position::new(x_axis.origin_pixel, center.y),
            to: Position::new(x_axis.end_pixel(), center.y),
        };

        let x_label = AxisLabel {
            text: X_AXIS_LABEL.to_owned(),
            anchor: Position::new(center.x, baseline + height * AXIS_LABEL_OFFSET_RATIO),
        };
        let y_label = AxisLabel {
            text: Y_AXIS_LABEL.to_owned(),
            anchor: Position::new(x_axis.origin_pixel - width * AXIS_LABEL_OFFSET_RATIO, center.y),
        };

        Self { width, height, x_axis, y_axis, x_line, y_line, mid_vertical, mid_horizontal, x_label, y_label }
    }
}

/// Clamp an axis value into `[0, 10]`. NaN becomes 0.
#[must_use]
pub fn clamp_axis_value(value: f64) -> f64 {
    clamp_or_zero(value, 0.0, AXIS_VALUE_MAX)
}

/// Map a "Resources Required" value to a pixel x.
#[must_use]
pub fn value_to_pixel_x(value: f64, axis: &AxisConfig) -> f64 {
    axis.origin_pixel + axis.step() * clamp_axis_value(value)
}

/// Map a "Priority" value to a pixel y. Higher priority sits higher up.
#[must_use]
pub fn value_to_pixel_y(value: f64, axis: &AxisConfig) -> f64 {
    axis.origin_pixel + axis.step() * (AXIS_VALUE_MAX - clamp_axis_value(value))
}

/// Inverse of [`value_to_pixel_x`], clamped into the axis range.
#[must_use]
pub fn pixel_to_value_x(pixel: f64, axis: &AxisConfig) -> f64 {
    if axis.step() <= 0.0 {
        return 0.0;
    }
    clamp_axis_value((pixel - axis.origin_pixel) / axis.step())
}

/// Inverse of [`value_to_pixel_y`], clamped into the axis range.
#[must_use]
pub fn pixel_to_value_y(pixel: f64, axis: &AxisConfig) -> f64 {
    if axis.step() <= 0.0 {
        return 0.0;
    }
    clamp_axis_value(AXIS_VALUE_MAX - (pixel - axis.origin_pixel) / axis.step())
}

/// Canvas center; where new items land when no placement is given.
#[must_use]
pub fn default_position(width: f64, height: f64) -> Position {
    Position::new(width / 2.0, height / 2.0)
}

fn clamp_or_zero(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() || max < min {
        return min.max(0.0);
    }
    value.clamp(min, max)
}
