pub mod autosave;
pub mod resize;
