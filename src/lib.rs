//! lilt: a local folder music player with play modes and synchronized
//! lyrics.

pub mod audio;
pub mod config;
pub mod library;
pub mod lyrics;
pub mod runtime;
pub mod session;
pub mod store;
pub mod ui;
