use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Sender;

use rand::{Rng, RngCore};

use crate::audio::{BackendEvent, BackendNotice, MediaBackend, MediaStatus, PlaybackState};
use crate::library::{Catalog, CoverArt, Track};
use crate::lyrics::LyricsTracker;
use crate::store::SettingsStore;

use super::mode::PlayMode;

/// Display attributes of the active track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NowPlaying {
    pub source: PathBuf,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub lyrics: String,
    pub cover: CoverArt,
}

impl NowPlaying {
    fn from_track(track: &Track) -> Self {
        Self {
            source: track.source.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            lyrics: track.lyrics.clone(),
            cover: track.cover.clone(),
        }
    }
}

/// Change notifications for whoever renders the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    CatalogReplaced { len: usize },
    CurrentIndexChanged(usize),
    /// Title, artist, album, lyrics and cover were replaced together.
    NowPlayingChanged,
    LyricsChanged { current: String, next: String },
    PlayingChanged(bool),
    PositionChanged(u64),
    DurationChanged(u64),
    PlayModeChanged(PlayMode),
    VolumeChanged(f32),
    MutedChanged(bool),
}

/// Owns the current index, play mode and playback intent.
///
/// Every command is inert when it cannot apply (empty catalog, index out of
/// range, unchanged mode); there is no error channel.
pub struct SessionController<B, S> {
    backend: B,
    settings: S,
    rng: Box<dyn RngCore>,
    events: Sender<SessionEvent>,

    catalog: Arc<Catalog>,
    current: Option<usize>,
    /// Bumped on every load; backend notices from older loads are dropped.
    generation: u64,
    mode: PlayMode,
    playing: bool,
    position_ms: u64,
    duration_ms: u64,
    now_playing: NowPlaying,
    lyrics: LyricsTracker,
    volume: f32,
    muted: bool,
}

impl<B: MediaBackend, S: SettingsStore> SessionController<B, S> {
    /// Create a session with an empty catalog. Play mode, volume and mute
    /// state come from `settings`; an unknown stored mode becomes the default.
    pub fn new(backend: B, settings: S, rng: Box<dyn RngCore>, events: Sender<SessionEvent>) -> Self {
        let mode = PlayMode::from_raw_or_default(settings.play_mode());
        let volume = settings.volume();
        let muted = settings.muted();

        let mut session = Self {
            backend,
            settings,
            rng,
            events,
            catalog: Arc::new(Catalog::default()),
            current: None,
            generation: 0,
            mode,
            playing: false,
            position_ms: 0,
            duration_ms: 0,
            now_playing: NowPlaying::default(),
            lyrics: LyricsTracker::new(),
            volume,
            muted,
        };
        session.apply_volume();
        session
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Whether the catalog row at `index` is the track being played. False
    /// once a reload put a different track (or nothing) at the kept index.
    pub fn is_current(&self, index: usize) -> bool {
        self.current == Some(index)
            && self
                .catalog
                .get(index)
                .is_some_and(|track| track.source == self.now_playing.source)
    }

    /// Load generation of the active track.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn play_mode(&self) -> PlayMode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn now_playing(&self) -> &NowPlaying {
        &self.now_playing
    }

    pub fn current_lyric(&self) -> &str {
        self.lyrics.current()
    }

    pub fn next_lyric(&self) -> &str {
        self.lyrics.next()
    }

    pub fn has_lyrics(&self) -> bool {
        !self.lyrics.is_empty()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut S {
        &mut self.settings
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    /// Swap in a freshly ingested catalog. The current index is left alone.
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) {
        let len = catalog.len();
        self.catalog = catalog;
        tracing::debug!("session: catalog replaced ({len} tracks)");
        self.emit(SessionEvent::CatalogReplaced { len });
    }

    /// Make `index` the active track and start playing it.
    pub fn play_index(&mut self, index: usize) {
        let catalog = Arc::clone(&self.catalog);
        let Some(track) = catalog.get(index) else {
            tracing::debug!("session: no track at index {index}");
            return;
        };

        self.current = Some(index);
        self.emit(SessionEvent::CurrentIndexChanged(index));

        self.now_playing = NowPlaying::from_track(track);
        self.position_ms = 0;
        self.duration_ms = track.duration_ms;
        self.lyrics.load(&track.lyrics);
        self.emit(SessionEvent::NowPlayingChanged);
        self.emit(SessionEvent::LyricsChanged {
            current: String::new(),
            next: String::new(),
        });

        self.generation += 1;
        tracing::debug!("session: play #{index} {:?} (load {})", track.source, self.generation);
        self.backend.load_source(&track.source, self.generation);
        self.backend.play();
    }

    pub fn play(&mut self) {
        self.backend.play();
    }

    pub fn pause(&mut self) {
        self.backend.pause();
    }

    pub fn toggle_play(&mut self) {
        if self.backend.playback_state() == PlaybackState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn seek(&mut self, position_ms: u64) {
        self.backend.seek(position_ms);
    }

    /// Advance according to the play mode.
    pub fn next(&mut self) {
        let count = self.catalog.len();
        if count == 0 {
            return;
        }

        let index = match self.mode {
            PlayMode::LoopOne => match self.current {
                Some(i) => i,
                None => return,
            },
            PlayMode::Random => self.rng.gen_range(0..count),
            PlayMode::Sequential | PlayMode::LoopAll => {
                self.current.map_or(0, |i| (i + 1) % count)
            }
        };
        self.play_index(index);
    }

    /// Step back one track, wrapping to the end. Ignores the play mode.
    pub fn previous(&mut self) {
        let count = self.catalog.len() as i64;
        if count == 0 {
            return;
        }
        let current = self.current.map_or(-1, |i| i as i64);
        let index = (current - 1 + count).rem_euclid(count);
        self.play_index(index as usize);
    }

    /// Change the play mode and persist it. Same mode is a no-op.
    pub fn set_play_mode(&mut self, mode: PlayMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        tracing::debug!("session: play mode {:?}", mode);
        self.emit(SessionEvent::PlayModeChanged(mode));
        if let Err(e) = self.settings.set_play_mode(mode.as_raw()) {
            tracing::warn!("could not persist play mode: {e}");
        }
    }

    /// [`set_play_mode`](Self::set_play_mode) from the integer encoding;
    /// unknown values are ignored.
    pub fn set_play_mode_raw(&mut self, raw: i64) {
        match PlayMode::from_raw(raw) {
            Some(mode) => self.set_play_mode(mode),
            None => tracing::debug!("session: ignoring unknown play mode {raw}"),
        }
    }

    pub fn toggle_play_mode(&mut self) {
        self.set_play_mode(self.mode.cycled());
    }

    /// Set the volume, clamped to `0.0..=1.0`, and persist it.
    pub fn set_volume(&mut self, volume: f32) {
        if !volume.is_finite() {
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        if volume == self.volume {
            return;
        }
        self.volume = volume;
        self.apply_volume();
        self.emit(SessionEvent::VolumeChanged(volume));
        if let Err(e) = self.settings.set_volume(volume) {
            tracing::warn!("could not persist volume: {e}");
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        if muted == self.muted {
            return;
        }
        self.muted = muted;
        self.apply_volume();
        self.emit(SessionEvent::MutedChanged(muted));
        if let Err(e) = self.settings.set_muted(muted) {
            tracing::warn!("could not persist mute state: {e}");
        }
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.muted);
    }

    fn apply_volume(&mut self) {
        let effective = if self.muted { 0.0 } else { self.volume };
        self.backend.set_volume(effective);
    }

    /// React to a notification from the media backend. Notices left over
    /// from an earlier load are ignored.
    pub fn handle_backend_event(&mut self, notice: BackendNotice) {
        if notice.generation != self.generation {
            tracing::debug!(
                "session: dropping {:?} from load {} (now {})",
                notice.event,
                notice.generation,
                self.generation
            );
            return;
        }
        match notice.event {
            BackendEvent::PositionChanged(ms) => self.on_position(ms),
            BackendEvent::DurationChanged(ms) => {
                if ms != self.duration_ms {
                    self.duration_ms = ms;
                    self.emit(SessionEvent::DurationChanged(ms));
                }
            }
            BackendEvent::PlaybackStateChanged(state) => {
                let playing = state == PlaybackState::Playing;
                if playing != self.playing {
                    self.playing = playing;
                    self.emit(SessionEvent::PlayingChanged(playing));
                }
            }
            BackendEvent::MediaStatusChanged(MediaStatus::EndOfMedia) => self.on_end_of_media(),
            BackendEvent::MediaStatusChanged(MediaStatus::Invalid) => {
                tracing::warn!("cannot play {:?}", self.now_playing.title);
            }
            BackendEvent::MediaStatusChanged(status) => {
                tracing::trace!("media status {:?}", status);
            }
        }
    }

    fn on_position(&mut self, ms: u64) {
        self.position_ms = ms;
        self.emit(SessionEvent::PositionChanged(ms));
        if self.lyrics.update(ms) {
            self.emit(SessionEvent::LyricsChanged {
                current: self.lyrics.current().to_string(),
                next: self.lyrics.next().to_string(),
            });
        }
    }

    /// Repeat-one restarts in place; every other mode advances like `next`.
    fn on_end_of_media(&mut self) {
        if self.mode == PlayMode::LoopOne {
            self.backend.seek(0);
            self.backend.play();
            return;
        }
        self.next();
    }
}
