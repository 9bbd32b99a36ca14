//! Timestamped lyrics: parsing of `[mm:ss.xx]` lines and position-driven
//! selection of the current and upcoming line.

mod parse;
mod sync;

pub use parse::{LyricLine, parse};
pub use sync::{LyricsTracker, select};

#[cfg(test)]
mod tests;
