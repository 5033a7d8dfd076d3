//! Spatial priority engine for the neo-strategy board.
//!
//! Items are markers placed on a two-axis canvas (Resources Required along x,
//! Priority along y). The engine owns the full lifecycle of those markers:
//! generating ids, tracking drawn handles, mapping semantic axis scores to
//! pixels, bucketing markers into quadrants for the ranked list view, and
//! round-tripping the board through a key/value store. The host layer is
//! responsible only for turning UI gestures into [`board::PriorityBoard`]
//! calls and drawing what the board reports back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`board`] | The [`board::PriorityBoard`] orchestrator |
//! | [`registry`] | Drawn-shape registry keyed by item id |
//! | [`coords`] | Positions, axis geometry, and value/pixel conversions |
//! | [`quadrant`] | Quadrant classification and ranked ordering |
//! | [`codec`] | JSON persistence codec for the item list |
//! | [`storage`] | Key/value storage backends (memory, JSON file) |
//! | [`settings`] | Display settings with change observers |
//! | [`id`] | Random alphanumeric id generation |
//! | [`error`] | Error taxonomy shared by the modules above |
//! | [`consts`] | Shared numeric constants (axis range, layout ratios, etc.) |

pub mod board;
pub mod codec;
pub mod consts;
pub mod coords;
pub mod error;
pub mod id;
pub mod quadrant;
pub mod registry;
pub mod settings;
pub mod storage;

pub use board::{PriorityBoard, PriorityItem, RankedEntry};
pub use coords::{AxisConfig, AxisGeometry, Position};
pub use error::BoardError;
pub use quadrant::{Classification, Quadrant};
