//! Track catalog and the folder ingestion pipeline.
//!
//! `scan` walks a folder, `naming` guesses title/artist from file names,
//! `probe` reads embedded metadata under a timeout and `cover` persists
//! embedded artwork. The result is an immutable [`Catalog`].

mod cover;
mod model;
mod naming;
mod probe;
mod scan;

pub use cover::{CoverError, persist_cover};
pub use model::*;
pub use naming::{UNKNOWN_ARTIST, distinct_artist, guess_from_base_name, names_from_base_name};
pub use probe::{LoftyProbe, MediaMetadata, MetadataProbe, ProbeError, ProbeOutcome, probe_bounded};
pub use scan::{Ingestor, list_audio_files};

#[cfg(test)]
mod tests;
