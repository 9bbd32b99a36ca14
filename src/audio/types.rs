//! Audio-related small types and handles.
//!
//! Commands flow into the audio thread as [`AudioCmd`]; everything the
//! thread observes flows back out as a [`BackendNotice`], the event tagged
//! with the load generation it belongs to.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaStatus {
    /// A source was opened and decoded far enough to play.
    Loaded,
    /// Playback of a loaded source started.
    Buffered,
    /// The source could not be opened or decoded.
    Invalid,
    /// The current source played to its end.
    EndOfMedia,
}

/// Notifications emitted by a media backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    PositionChanged(u64),
    DurationChanged(u64),
    PlaybackStateChanged(PlaybackState),
    MediaStatusChanged(MediaStatus),
}

/// A [`BackendEvent`] stamped with the generation of the load that produced
/// it. Events raised before the first load carry generation 0.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendNotice {
    pub generation: u64,
    pub event: BackendEvent,
}

impl BackendNotice {
    pub fn new(generation: u64, event: BackendEvent) -> Self {
        Self { generation, event }
    }
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Open a new source, replacing the current one. Leaves playback stopped.
    /// Everything reported afterwards carries `generation`.
    Load { path: PathBuf, generation: u64 },
    Play,
    Pause,
    /// Jump to an absolute position in milliseconds.
    Seek(u64),
    /// Output volume in `0.0..=1.0`.
    SetVolume(f32),
    /// Stop playback and end the audio thread.
    Quit,
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the controlling thread.
pub struct PlaybackInfo {
    pub state: PlaybackState,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Collapse runs of position ticks to their latest value.
///
/// Other events keep their relative order. A pending tick is flushed before
/// any of them, and before a notice from a different generation, so a
/// position is never reported under another load's generation.
pub fn coalesce_positions(notices: impl IntoIterator<Item = BackendNotice>) -> Vec<BackendNotice> {
    let mut out = Vec::new();
    let mut pending: Option<BackendNotice> = None;

    for notice in notices {
        if let Some(tick) = pending.take_if(|tick| tick.generation != notice.generation) {
            out.push(tick);
        }
        match notice.event {
            BackendEvent::PositionChanged(_) => pending = Some(notice),
            _ => {
                out.extend(pending.take());
                out.push(notice);
            }
        }
    }

    out.extend(pending);
    out
}
