use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/lilt/config.toml` or `~/.config/lilt/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LILT__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub state: StateSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    ///
    /// Defaults to `mp3`, `m4a`, `wav`, `flac` and `ogg`. A configured list
    /// replaces the default rather than extending it; a file is ingested iff
    /// its extension is in this list.
    pub extensions: Vec<String>,
    /// Whether to include hidden files (dotfiles).
    pub include_hidden: bool,
    /// Upper bound on the metadata probe of a single file (milliseconds).
    pub probe_timeout_ms: u64,
}

impl LibrarySettings {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: ["mp3", "m4a", "wav", "flac", "ogg"]
                .into_iter()
                .map(String::from)
                .collect(),
            include_hidden: false,
            probe_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// How often the audio thread reports the playback position (milliseconds).
    pub tick_ms: u64,
    /// Volume change per key press, in percent.
    pub volume_step: u8,
    /// Number of seconds to scrub when seeking backward/forward.
    pub scrub_seconds: u64,
}

impl PlaybackSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            volume_step: 5,
            scrub_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StateSettings {
    /// Where to keep persisted state. Defaults to `$XDG_STATE_HOME/lilt/state.toml`.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directives; `RUST_LOG` wins when set.
    pub filter: String,
    /// Directory for log files. Defaults to the state directory.
    pub dir: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            dir: None,
        }
    }
}
