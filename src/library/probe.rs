//! Best-effort metadata probing with a bounded wait.
//!
//! A probe runs on its own short-lived thread while the caller blocks on a
//! channel for at most the configured timeout. A probe that overruns is
//! abandoned; its thread finishes on its own and the result is discarded.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::{ItemKey, Tag};
use thiserror::Error;

/// Everything a probe managed to read from a file. Absent fields are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub contributing_artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
    /// Raw bytes of the embedded cover image.
    pub cover: Option<Vec<u8>>,
    /// Explicit lyrics field, if the container has one.
    pub lyrics: Option<String>,
    /// Every other textual tag as `(key, value)`.
    pub extra: Vec<(String, String)>,
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid media {path:?}: {reason}")]
    InvalidMedia { path: PathBuf, reason: String },
}

/// Result of a bounded probe.
#[derive(Debug)]
pub enum ProbeOutcome {
    Loaded(MediaMetadata),
    Invalid,
    TimedOut,
}

/// Source of per-file metadata used by ingestion.
pub trait MetadataProbe: Send + Sync {
    fn probe(&self, path: &Path) -> Result<MediaMetadata, ProbeError>;
}

/// Run `probe` on `path`, waiting at most `timeout` for an answer.
pub fn probe_bounded(
    probe: &Arc<dyn MetadataProbe>,
    path: &Path,
    timeout: Duration,
) -> ProbeOutcome {
    let (tx, rx) = mpsc::channel();
    let worker = Arc::clone(probe);
    let owned = path.to_path_buf();

    let spawned = thread::Builder::new()
        .name("lilt-probe".into())
        .spawn(move || {
            // The receiver is gone if we already timed out.
            let _ = tx.send(worker.probe(&owned));
        });

    if let Err(e) = spawned {
        tracing::warn!("could not spawn metadata probe for {:?}: {e}", path);
        return ProbeOutcome::Invalid;
    }

    match rx.recv_timeout(timeout) {
        Ok(Ok(meta)) => ProbeOutcome::Loaded(meta),
        Ok(Err(e)) => {
            tracing::debug!("{e}");
            ProbeOutcome::Invalid
        }
        Err(RecvTimeoutError::Timeout) => ProbeOutcome::TimedOut,
        // The probe thread panicked.
        Err(RecvTimeoutError::Disconnected) => ProbeOutcome::Invalid,
    }
}

/// Reads tags and audio properties with `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyProbe;

impl MetadataProbe for LoftyProbe {
    fn probe(&self, path: &Path) -> Result<MediaMetadata, ProbeError> {
        let tagged = lofty::read_from_path(path).map_err(|e| ProbeError::InvalidMedia {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut meta = MediaMetadata::default();

        let duration = tagged.properties().duration();
        if !duration.is_zero() {
            meta.duration = Some(duration);
        }

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            read_tag(tag, &mut meta);
        }

        // Some containers keep artwork in a secondary tag.
        if meta.cover.is_none() {
            meta.cover = tagged
                .tags()
                .iter()
                .flat_map(|t| t.pictures())
                .map(|p| p.data().to_vec())
                .find(|data| !data.is_empty());
        }

        Ok(meta)
    }
}

fn read_tag(tag: &Tag, meta: &mut MediaMetadata) {
    let text = |key: &ItemKey| {
        tag.get_string(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    meta.title = text(&ItemKey::TrackTitle);
    meta.artist = text(&ItemKey::TrackArtist);
    meta.album_artist = text(&ItemKey::AlbumArtist);
    meta.contributing_artist = text(&ItemKey::Performer);
    meta.album = text(&ItemKey::AlbumTitle);
    meta.lyrics = tag
        .get_string(&ItemKey::Lyrics)
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string);

    meta.cover = tag
        .pictures()
        .iter()
        .map(|p| p.data())
        .find(|data| !data.is_empty())
        .map(<[u8]>::to_vec);

    for item in tag.items() {
        if let Some(value) = item.value().text() {
            meta.extra.push((format!("{:?}", item.key()), value.to_string()));
        }
    }
}
