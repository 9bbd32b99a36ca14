use std::path::PathBuf;

/// Where a track's artwork comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CoverArt {
    /// The built-in default cover.
    #[default]
    Placeholder,
    /// Embedded artwork persisted to a temporary file during ingestion.
    File(PathBuf),
}

/// One playable item of the catalog.
///
/// Tracks are built once by the ingestion pipeline and never mutated
/// afterwards; a folder reload produces a brand new [`Catalog`].
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// File stem, used when nothing better is known.
    pub display_name: String,
    pub title: String,
    /// Never equal to `title`.
    pub artist: String,
    pub album: String,
    /// Raw lyrics payload, possibly empty.
    pub lyrics: String,
    pub source: PathBuf,
    /// Zero when unknown.
    pub duration_ms: u64,
    pub cover: CoverArt,
}

/// Ordered, index-addressed collection of tracks for one folder load.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub(crate) fn push(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        self.tracks.len() - 1
    }
}

/// Structural change notifications emitted while a catalog is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEvent {
    /// A folder load started; the previous catalog is about to be replaced.
    ResetBegin,
    /// A single track was appended at this index.
    Inserted(usize),
    /// The folder load finished with this many tracks.
    ResetEnd { len: usize },
}
