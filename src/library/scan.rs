use std::mem;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::Sender;

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::cover::persist_cover;
use super::model::{Catalog, CatalogEvent, CoverArt, Track};
use super::naming::{distinct_artist, names_from_base_name};
use super::probe::{LoftyProbe, MediaMetadata, MetadataProbe, ProbeOutcome, probe_bounded};

/// Minimum length for an untyped tag value to be taken as lyrics.
const LYRICS_MIN_CHARS: usize = 50;

pub(crate) fn is_audio_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .any(|e| !e.is_empty() && e == ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Audio files directly inside `dir`, sorted by file name.
pub fn list_audio_files(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && (settings.include_hidden || !is_hidden(path))
                && is_audio_file(path, &settings.extensions)
        })
        .collect()
}

/// Turns a folder into a [`Catalog`], one file at a time.
pub struct Ingestor {
    settings: LibrarySettings,
    probe: Arc<dyn MetadataProbe>,
}

impl Ingestor {
    pub fn new(settings: LibrarySettings, probe: Arc<dyn MetadataProbe>) -> Self {
        Self { settings, probe }
    }

    pub fn with_lofty(settings: LibrarySettings) -> Self {
        Self::new(settings, Arc::new(LoftyProbe))
    }

    /// Build a fresh catalog from the audio files in `dir`.
    ///
    /// Returns `None` (and emits nothing) when `dir` is not an existing
    /// directory. Otherwise every matching file yields a track, whatever
    /// its probe outcome.
    pub fn load_folder(
        &self,
        dir: &Path,
        events: Option<&Sender<CatalogEvent>>,
    ) -> Option<Catalog> {
        if !dir.is_dir() {
            tracing::warn!("music folder {:?} does not exist", dir);
            return None;
        }

        notify(events, CatalogEvent::ResetBegin);

        let mut catalog = Catalog::default();
        for path in list_audio_files(dir, &self.settings) {
            let track = self.synthesize(&path);
            let index = catalog.push(track);
            notify(events, CatalogEvent::Inserted(index));
        }

        notify(events, CatalogEvent::ResetEnd { len: catalog.len() });
        tracing::info!("loaded {} tracks from {:?}", catalog.len(), dir);
        Some(catalog)
    }

    /// Build the track for a single file: filename guess, then metadata.
    pub fn synthesize(&self, path: &Path) -> Track {
        let base = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (title, artist) = names_from_base_name(&base);

        let mut track = Track {
            display_name: base,
            title,
            artist,
            album: String::new(),
            lyrics: String::new(),
            source: std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
            duration_ms: 0,
            cover: CoverArt::Placeholder,
        };

        match probe_bounded(&self.probe, path, self.settings.probe_timeout()) {
            ProbeOutcome::Loaded(meta) => apply_metadata(&mut track, meta),
            ProbeOutcome::Invalid => {
                tracing::debug!("no usable metadata in {:?}, keeping filename guess", path);
            }
            ProbeOutcome::TimedOut => {
                tracing::warn!(
                    "metadata probe for {:?} timed out after {:?}",
                    path,
                    self.settings.probe_timeout()
                );
            }
        }

        track.artist = distinct_artist(&track.title, mem::take(&mut track.artist));
        track
    }
}

fn notify(events: Option<&Sender<CatalogEvent>>, event: CatalogEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn apply_metadata(track: &mut Track, meta: MediaMetadata) {
    if let Some(title) = present(meta.title) {
        track.title = title;
    }

    let artist = present(meta.artist)
        .or_else(|| present(meta.album_artist))
        .or_else(|| present(meta.contributing_artist));
    if let Some(artist) = artist {
        track.artist = artist;
    }

    if let Some(album) = present(meta.album) {
        track.album = album;
    }

    if let Some(duration) = meta.duration.filter(|d| !d.is_zero()) {
        track.duration_ms = duration.as_millis() as u64;
    }

    let lyrics = present(meta.lyrics).or_else(|| lyrics_from_tags(&meta.extra));
    if let Some(lyrics) = lyrics {
        track.lyrics = lyrics;
    }

    if let Some(bytes) = meta.cover {
        match persist_cover(&bytes) {
            Ok(path) => {
                tracing::debug!("cover for {:?} saved to {:?}", track.source, path);
                track.cover = CoverArt::File(path);
            }
            Err(e) => tracing::warn!("keeping default cover for {:?}: {e}", track.source),
        }
    }
}

/// Pick the first tag value that looks like a lyrics payload.
pub(crate) fn lyrics_from_tags(extra: &[(String, String)]) -> Option<String> {
    extra
        .iter()
        .map(|(_, value)| value)
        .find(|value| looks_like_lyrics(value))
        .cloned()
}

fn looks_like_lyrics(value: &str) -> bool {
    if value.chars().count() <= LYRICS_MIN_CHARS {
        return false;
    }
    let lower = value.to_lowercase();
    value.contains('\n') || value.contains('\r') || lower.contains("lyric") || lower.contains("text")
}
