use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use super::backend::MediaBackend;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, BackendNotice, PlaybackHandle, PlaybackInfo, PlaybackState};

/// `rodio` playback running on a dedicated thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Start the audio thread. Position ticks arrive every `tick` while playing.
    pub fn new(tick: Duration) -> (Self, Receiver<BackendNotice>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<BackendNotice>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(rx, events_tx, playback_info.clone(), tick);

        let player = Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        };
        (player, events_rx)
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    /// Stop playback and wait for the audio thread to finish.
    pub fn quit(&self) {
        let _ = self.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl MediaBackend for AudioPlayer {
    fn load_source(&mut self, source: &Path, generation: u64) {
        let _ = self.send(AudioCmd::Load {
            path: source.to_path_buf(),
            generation,
        });
    }

    fn play(&mut self) {
        let _ = self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        let _ = self.send(AudioCmd::Pause);
    }

    fn seek(&mut self, position_ms: u64) {
        let _ = self.send(AudioCmd::Seek(position_ms));
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.send(AudioCmd::SetVolume(volume));
    }

    fn playback_state(&self) -> PlaybackState {
        self.playback
            .lock()
            .map(|info| info.state)
            .unwrap_or_default()
    }
}
