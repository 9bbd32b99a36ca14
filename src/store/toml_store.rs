use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::SettingsStore;
use super::schema::PersistedState;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write state file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// [`SettingsStore`] backed by a TOML file. Without a path it only keeps
/// values in memory.
#[derive(Debug, Clone)]
pub struct TomlStore {
    path: Option<PathBuf>,
    state: PersistedState,
}

impl TomlStore {
    /// Open the state file at `path`. A missing or unreadable file yields
    /// defaults; the file is created on the first change.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = read_state(&path);
        Self {
            path: Some(path),
            state,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: PersistedState::default(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    fn update(&mut self, apply: impl FnOnce(&mut PersistedState)) -> Result<(), StoreError> {
        apply(&mut self.state);
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(&self.state)?)?;
        Ok(())
    }
}

fn read_state(path: &Path) -> PersistedState {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return PersistedState::default(),
        Err(e) => {
            tracing::warn!("could not read state file {:?}, using defaults: {e}", path);
            return PersistedState::default();
        }
    };

    toml::from_str(&text).unwrap_or_else(|e| {
        tracing::warn!("state file {:?} is malformed, using defaults: {e}", path);
        PersistedState::default()
    })
}

impl SettingsStore for TomlStore {
    fn background_image(&self) -> Option<PathBuf> {
        self.state.background_image.clone()
    }

    fn set_background_image(&mut self, image: Option<PathBuf>) -> Result<(), StoreError> {
        self.update(|s| s.background_image = image)
    }

    fn background_images(&self) -> Vec<PathBuf> {
        self.state.background_images.clone()
    }

    fn set_background_images(&mut self, images: Vec<PathBuf>) -> Result<(), StoreError> {
        self.update(|s| s.background_images = images)
    }

    fn background_index(&self) -> i64 {
        self.state.background_index
    }

    fn set_background_index(&mut self, index: i64) -> Result<(), StoreError> {
        self.update(|s| s.background_index = index)
    }

    fn music_folder(&self) -> Option<PathBuf> {
        self.state.music_folder.clone()
    }

    fn set_music_folder(&mut self, folder: PathBuf) -> Result<(), StoreError> {
        self.update(|s| s.music_folder = Some(folder))
    }

    fn play_mode(&self) -> i64 {
        self.state.play_mode
    }

    fn set_play_mode(&mut self, mode: i64) -> Result<(), StoreError> {
        self.update(|s| s.play_mode = mode)
    }

    fn volume(&self) -> f32 {
        let v = self.state.volume;
        if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 }
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), StoreError> {
        self.update(|s| s.volume = volume.clamp(0.0, 1.0))
    }

    fn muted(&self) -> bool {
        self.state.muted
    }

    fn set_muted(&mut self, muted: bool) -> Result<(), StoreError> {
        self.update(|s| s.muted = muted)
    }
}
