use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::sink::create_sink_at;
use super::types::{AudioCmd, BackendEvent, BackendNotice, MediaStatus, PlaybackHandle, PlaybackState};

/// State owned by the audio thread.
struct Deck {
    stream: OutputStream,
    events: Sender<BackendNotice>,
    playback_info: PlaybackHandle,
    /// Generation of the last `Load`; stamped on every outgoing event.
    generation: u64,
    sink: Option<Sink>,
    source: Option<PathBuf>,
    /// Position the current sink started from; `Sink::get_pos` counts from here.
    offset: Duration,
    state: PlaybackState,
    volume: f32,
}

impl Deck {
    fn emit(&self, event: BackendEvent) {
        let _ = self.events.send(BackendNotice::new(self.generation, event));
    }

    fn position(&self) -> Duration {
        self.offset + self.sink.as_ref().map_or(Duration::ZERO, |s| s.get_pos())
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state == state {
            return;
        }
        self.state = state;
        if let Ok(mut info) = self.playback_info.lock() {
            info.state = state;
        }
        self.emit(BackendEvent::PlaybackStateChanged(state));
    }

    fn report_position(&self) {
        let position = self.position().as_millis() as u64;
        self.emit(BackendEvent::PositionChanged(position));
    }

    fn drop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    /// Replace the sink with a fresh one for the current source at `start_at`.
    /// Returns `false` when the source cannot be opened.
    fn rebuild(&mut self, start_at: Duration) -> bool {
        self.drop_sink();
        let Some(path) = self.source.clone() else {
            return false;
        };

        match create_sink_at(&self.stream, &path, start_at, self.volume) {
            Ok((sink, total)) => {
                self.sink = Some(sink);
                self.offset = start_at;
                if let Some(total) = total {
                    self.emit(BackendEvent::DurationChanged(total.as_millis() as u64));
                }
                true
            }
            Err(e) => {
                tracing::warn!("{e}");
                self.source = None;
                self.set_state(PlaybackState::Stopped);
                self.emit(BackendEvent::MediaStatusChanged(MediaStatus::Invalid));
                false
            }
        }
    }

    fn load(&mut self, path: PathBuf, generation: u64) {
        tracing::debug!("audio: load #{generation} {:?}", path);
        self.generation = generation;
        self.source = Some(path);
        self.set_state(PlaybackState::Stopped);
        if self.rebuild(Duration::ZERO) {
            self.emit(BackendEvent::MediaStatusChanged(MediaStatus::Loaded));
            self.report_position();
        }
    }

    fn play(&mut self) {
        let finished = self.sink.as_ref().is_none_or(|s| s.empty());
        // Playing a finished source starts it over.
        if finished && !self.rebuild(Duration::ZERO) {
            return;
        }
        if let Some(s) = self.sink.as_ref() {
            s.play();
            self.set_state(PlaybackState::Playing);
            self.emit(BackendEvent::MediaStatusChanged(MediaStatus::Buffered));
        }
    }

    fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        self.set_state(PlaybackState::Paused);
    }

    fn seek(&mut self, position_ms: u64) {
        if self.source.is_none() {
            return;
        }
        let resume = self.state == PlaybackState::Playing;
        if !self.rebuild(Duration::from_millis(position_ms)) {
            return;
        }
        if let Some(s) = self.sink.as_ref().filter(|_| resume) {
            s.play();
        }
        self.report_position();
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(self.volume);
        }
    }

    /// Periodic check: publish position and detect the end of the source.
    fn tick(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let ended = self.sink.as_ref().is_none_or(|s| s.empty());
        if ended {
            self.set_state(PlaybackState::Stopped);
            self.emit(BackendEvent::MediaStatusChanged(MediaStatus::EndOfMedia));
        } else {
            self.report_position();
        }
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<BackendNotice>,
    playback_info: PlaybackHandle,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                tracing::error!("no audio output device: {e}");
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut deck = Deck {
            stream,
            events,
            playback_info,
            generation: 0,
            sink: None,
            source: None,
            offset: Duration::ZERO,
            state: PlaybackState::Stopped,
            volume: 1.0,
        };

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load { path, generation } => deck.load(path, generation),
                    AudioCmd::Play => deck.play(),
                    AudioCmd::Pause => deck.pause(),
                    AudioCmd::Seek(ms) => deck.seek(ms),
                    AudioCmd::SetVolume(v) => deck.set_volume(v),
                    AudioCmd::Quit => {
                        deck.drop_sink();
                        deck.set_state(PlaybackState::Stopped);
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => deck.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
