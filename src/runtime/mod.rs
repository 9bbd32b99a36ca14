use std::env;
use std::sync::mpsc;

use anyhow::Context;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::AudioPlayer;
use crate::library::Ingestor;
use crate::session::SessionController;
use crate::store::TomlStore;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> anyhow::Result<()> {
    let (settings, config_problem) = settings::load_settings();

    if let Err(e) = logging::init(&settings) {
        eprintln!("lilt: logging disabled: {e:#}");
    }
    if let Some(msg) = config_problem {
        tracing::warn!("{msg}");
    }

    let store = match settings.state_path() {
        Some(path) => TomlStore::open(path),
        None => {
            tracing::warn!("no state directory available, settings will not persist");
            TomlStore::in_memory()
        }
    };

    let folder = startup::resolve_folder(env::args().nth(1), &store);

    let (audio_player, backend_rx) = AudioPlayer::new(settings.playback.tick());
    let (session_tx, session_rx) = mpsc::channel();
    let rng = Box::new(StdRng::from_entropy());
    let mut session = SessionController::new(audio_player, store, rng, session_tx);

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Ingest after the terminal is up so the first frame is not delayed.
    tracing::info!("loading {:?}", folder);
    let load = startup::spawn_folder_load(Ingestor::with_lofty(settings.library.clone()), folder);

    let mut state = event_loop::EventLoopState::default();
    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut session,
        &backend_rx,
        &session_rx,
        &load,
        &mut state,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    session.backend().quit();
    run_result
}
