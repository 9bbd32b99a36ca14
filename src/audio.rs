//! Audio backend: the [`MediaBackend`] seam the session drives and its
//! `rodio` implementation running on a dedicated thread.

mod backend;
mod player;
mod sink;
mod thread;
mod types;

pub use backend::MediaBackend;
pub use player::AudioPlayer;
pub use sink::SinkError;
pub use types::*;

#[cfg(test)]
mod tests;
