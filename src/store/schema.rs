use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk layout of the state file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub background_image: Option<PathBuf>,
    pub background_images: Vec<PathBuf>,
    pub background_index: i64,
    pub music_folder: Option<PathBuf>,
    /// 0 = sequential, 1 = loop one, 2 = loop all, 3 = random.
    pub play_mode: i64,
    pub volume: f32,
    pub muted: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            background_image: None,
            background_images: Vec::new(),
            background_index: -1,
            music_folder: None,
            play_mode: 1,
            volume: 1.0,
            muted: false,
        }
    }
}
