//! Playback session: the play-mode state machine and track advancement.

mod controller;
mod mode;

pub use controller::{NowPlaying, SessionController, SessionEvent};
pub use mode::PlayMode;
