use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoverError {
    #[error("cover image is empty")]
    Empty,
    #[error("failed to write cover image: {0}")]
    Io(#[from] io::Error),
    #[error("failed to keep cover image: {0}")]
    Persist(#[from] tempfile::PersistError),
}

const PNG_MAGIC: &[u8] = b"\x89PNG";

/// Write embedded artwork to a uniquely named file in the temp directory.
///
/// The file outlives the process; its path is what the track records.
pub fn persist_cover(bytes: &[u8]) -> Result<PathBuf, CoverError> {
    if bytes.is_empty() {
        return Err(CoverError::Empty);
    }

    let suffix = if bytes.starts_with(PNG_MAGIC) {
        ".png"
    } else {
        ".jpg"
    };

    let mut file = tempfile::Builder::new()
        .prefix("lilt_cover_")
        .suffix(suffix)
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;

    let (_, path) = file.keep()?;
    Ok(path)
}
