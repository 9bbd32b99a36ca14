use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::{AudioPlayer, BackendNotice, coalesce_positions};
use crate::config;
use crate::library::CatalogEvent;
use crate::runtime::startup::FolderLoad;
use crate::session::{SessionController, SessionEvent};
use crate::store::{SettingsStore, TomlStore};
use crate::ui;

pub type Session = SessionController<AudioPlayer, TomlStore>;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Cursor in the track list, independent of the playing index.
    pub selected: usize,
    /// Folder shown in the header once a load finished.
    pub folder: Option<PathBuf>,
    /// Tracks ingested so far while a load is running.
    pub scanning: Option<usize>,
    /// Internal two-key prefix state used for `gg` handling.
    pending_gg: bool,
}

/// Main terminal event loop: feeds ingestion and backend notifications into
/// the session, draws, and dispatches keys. Returns `Ok(())` when shutdown
/// is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    session: &mut Session,
    backend_rx: &Receiver<BackendNotice>,
    session_rx: &Receiver<SessionEvent>,
    load: &FolderLoad,
    state: &mut EventLoopState,
) -> anyhow::Result<()> {
    loop {
        sync_folder_load(session, load, state);

        // Only the newest position tick of a burst matters.
        let pending: Vec<BackendNotice> = backend_rx.try_iter().collect();
        for notice in coalesce_positions(pending) {
            session.handle_backend_event(notice);
        }

        for ev in session_rx.try_iter() {
            match ev {
                SessionEvent::CurrentIndexChanged(i) => state.selected = i,
                SessionEvent::CatalogReplaced { len } => {
                    state.selected = state.selected.min(len.saturating_sub(1));
                }
                _ => {}
            }
        }

        let view = ui::ListView {
            selected: state.selected,
            folder: state.folder.as_deref(),
            scanning: state.scanning,
        };
        terminal.draw(|f| ui::draw(f, session, &view, &settings.playback))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, session, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn sync_folder_load(session: &mut Session, load: &FolderLoad, state: &mut EventLoopState) {
    for ev in load.events.try_iter() {
        match ev {
            CatalogEvent::ResetBegin => state.scanning = Some(0),
            CatalogEvent::Inserted(_) => {
                if let Some(n) = state.scanning.as_mut() {
                    *n += 1;
                }
            }
            CatalogEvent::ResetEnd { .. } => state.scanning = None,
        }
    }

    let Ok((folder, catalog)) = load.done.try_recv() else {
        return;
    };
    state.scanning = None;
    let Some(catalog) = catalog else {
        return;
    };

    session.replace_catalog(Arc::new(catalog));
    if let Err(e) = session.settings_mut().set_music_folder(folder.clone()) {
        tracing::warn!("could not remember music folder: {e}");
    }
    state.folder = Some(folder);
}

/// Returns `true` when the user asked to quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    session: &mut Session,
    state: &mut EventLoopState,
) -> bool {
    let count = session.catalog().len();
    let was_gg = std::mem::take(&mut state.pending_gg);

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('g') => {
            if was_gg {
                state.selected = 0;
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => state.selected = count.saturating_sub(1),
        KeyCode::Char('j') | KeyCode::Down => {
            if state.selected + 1 < count {
                state.selected += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => state.selected = state.selected.saturating_sub(1),
        KeyCode::Enter => {
            let already_playing =
                session.is_playing() && session.current_index() == Some(state.selected);
            if !already_playing {
                session.play_index(state.selected);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            if session.current_index().is_some() {
                session.toggle_play();
            } else {
                session.play_index(state.selected);
            }
        }
        KeyCode::Char('l') => session.next(),
        KeyCode::Char('h') => session.previous(),
        KeyCode::Char('L') => {
            let step = settings.playback.scrub_seconds.saturating_mul(1000);
            let target = session.position_ms().saturating_add(step);
            let target = match session.duration_ms() {
                0 => target,
                d => target.min(d),
            };
            session.seek(target);
        }
        KeyCode::Char('H') => {
            let step = settings.playback.scrub_seconds.saturating_mul(1000);
            session.seek(session.position_ms().saturating_sub(step));
        }
        KeyCode::Char('r') => session.toggle_play_mode(),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let step = f32::from(settings.playback.volume_step) / 100.0;
            session.set_volume(session.volume() + step);
        }
        KeyCode::Char('-') => {
            let step = f32::from(settings.playback.volume_step) / 100.0;
            session.set_volume(session.volume() - step);
        }
        KeyCode::Char('m') => session.toggle_mute(),
        _ => {}
    }

    false
}
