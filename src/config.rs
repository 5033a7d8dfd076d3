//! Host configuration parsed from environment variables.
//!
//! Every knob has a default, so the service starts with no environment at
//! all. Unparseable values fall back to the default rather than aborting.

use std::path::PathBuf;
use std::time::Duration;

use matrix::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STORAGE_PATH: &str = "neo-strategy.json";
pub const DEFAULT_AUTOSAVE_SECS: u64 = 120;
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    /// JSON file backing the key/value store.
    pub storage_path: PathBuf,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Period of the background save.
    pub autosave_interval: Duration,
    /// Quiet period before a burst of resize events is applied.
    pub resize_debounce: Duration,
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `MATRIX_STORAGE_PATH`: default `neo-strategy.json`
    /// - `MATRIX_CANVAS_WIDTH` / `MATRIX_CANVAS_HEIGHT`: default 500
    /// - `MATRIX_AUTOSAVE_SECS`: default 120
    /// - `MATRIX_RESIZE_DEBOUNCE_MS`: default 100
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: parse_or(lookup("PORT"), DEFAULT_PORT),
            storage_path: lookup("MATRIX_STORAGE_PATH")
                .filter(|v| !v.trim().is_empty())
                .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from),
            canvas_width: parse_or(lookup("MATRIX_CANVAS_WIDTH"), DEFAULT_CANVAS_WIDTH),
            canvas_height: parse_or(lookup("MATRIX_CANVAS_HEIGHT"), DEFAULT_CANVAS_HEIGHT),
            autosave_interval: Duration::from_secs(
                parse_or(lookup("MATRIX_AUTOSAVE_SECS"), DEFAULT_AUTOSAVE_SECS).max(1),
            ),
            resize_debounce: Duration::from_millis(parse_or(
                lookup("MATRIX_RESIZE_DEBOUNCE_MS"),
                DEFAULT_RESIZE_DEBOUNCE_MS,
            )),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T>(raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr,
{
    raw.and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
