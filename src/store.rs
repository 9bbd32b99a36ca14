//! Persisted user state: last folder, play mode, volume and the background
//! image bookkeeping.
//!
//! [`SettingsStore`] is the seam the session persists through; [`TomlStore`]
//! keeps the values in a small TOML file, rewritten on every change.

mod schema;
mod toml_store;

pub use schema::PersistedState;
pub use toml_store::{StoreError, TomlStore};

use std::path::PathBuf;

/// Typed access to persisted user state. Absent values read as defaults.
pub trait SettingsStore {
    fn background_image(&self) -> Option<PathBuf>;
    fn set_background_image(&mut self, image: Option<PathBuf>) -> Result<(), StoreError>;

    fn background_images(&self) -> Vec<PathBuf>;
    fn set_background_images(&mut self, images: Vec<PathBuf>) -> Result<(), StoreError>;

    /// `-1` when no background is selected.
    fn background_index(&self) -> i64;
    fn set_background_index(&mut self, index: i64) -> Result<(), StoreError>;

    fn music_folder(&self) -> Option<PathBuf>;
    fn set_music_folder(&mut self, folder: PathBuf) -> Result<(), StoreError>;

    /// Raw play mode; callers coerce unknown values.
    fn play_mode(&self) -> i64;
    fn set_play_mode(&mut self, mode: i64) -> Result<(), StoreError>;

    /// Always within `0.0..=1.0`.
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32) -> Result<(), StoreError>;

    fn muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests;
