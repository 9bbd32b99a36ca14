use std::path::Path;

use super::types::PlaybackState;

/// The media I/O the session controller drives.
///
/// Implementations report what actually happens (position ticks, state
/// changes, end of media) as [`BackendNotice`](super::BackendNotice)s through
/// their own channel; these methods only express intent.
pub trait MediaBackend {
    /// Replace the current source. Every notice raised after this call is
    /// stamped with `generation`.
    fn load_source(&mut self, source: &Path, generation: u64);
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position_ms: u64);
    fn set_volume(&mut self, volume: f32);
    fn playback_state(&self) -> PlaybackState;
}
