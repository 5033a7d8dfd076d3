//! Shared numeric constants for the matrix crate.

// ── Axes ────────────────────────────────────────────────────────

/// Upper bound of the semantic axis range. The lower bound is zero.
pub const AXIS_VALUE_MAX: f64 = 10.0;

/// Fraction of a canvas dimension where an axis starts.
pub const AXIS_START_RATIO: f64 = 0.1;

/// Fraction of a canvas dimension where an axis ends.
pub const AXIS_END_RATIO: f64 = 0.9;

/// Gap between the x-axis line and its label, as a fraction of canvas height.
pub const AXIS_LABEL_OFFSET_RATIO: f64 = 0.05;

/// Label drawn under the horizontal axis.
pub const X_AXIS_LABEL: &str = "Resources Required";

/// Label drawn beside the vertical axis.
pub const Y_AXIS_LABEL: &str = "Priority";

// ── Canvas ──────────────────────────────────────────────────────

/// Initial canvas width in pixels before the host reports a real size.
pub const DEFAULT_CANVAS_WIDTH: f64 = 500.0;

/// Initial canvas height in pixels before the host reports a real size.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 500.0;

// ── Ids ─────────────────────────────────────────────────────────

/// Length of generated item ids.
pub const ID_LENGTH: usize = 10;

/// Characters generated ids are drawn from.
pub const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Upper bound on regeneration attempts when a fresh id collides.
pub const ID_MAX_ATTEMPTS: usize = 16;

// ── Settings ────────────────────────────────────────────────────

/// Default marker circle radius in pixels.
pub const DEFAULT_MARKER_RADIUS: f64 = 25.0;

/// Default font size of the number drawn inside a marker.
pub const DEFAULT_MARKER_FONT_SIZE: f64 = 25.0;

/// Default font size of the axis labels.
pub const DEFAULT_AXIS_LABEL_FONT_SIZE: f64 = 25.0;

// ── Storage ─────────────────────────────────────────────────────

/// Storage key holding the encoded item list.
pub const STORAGE_KEY: &str = "priorities";

/// Storage key receiving a saved list that could not be restored.
pub const STORAGE_BACKUP_KEY: &str = "priorities.corrupt";
