use std::env;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use crate::library::{Catalog, CatalogEvent, Ingestor};
use crate::store::SettingsStore;

/// A folder load running off the UI thread.
pub struct FolderLoad {
    /// Structural progress, in emission order.
    pub events: Receiver<CatalogEvent>,
    /// Fires once with the folder and its catalog (`None` when the folder
    /// does not exist).
    pub done: Receiver<(PathBuf, Option<Catalog>)>,
}

/// Pick the folder to load: command line, then the remembered folder, then
/// the working directory.
pub fn resolve_folder(arg: Option<String>, store: &impl SettingsStore) -> PathBuf {
    if let Some(arg) = arg {
        return PathBuf::from(arg);
    }
    if let Some(folder) = store.music_folder() {
        return folder;
    }
    env::current_dir().unwrap_or_else(|_| PathBuf::from("Music"))
}

/// Ingest `folder` on a background thread so the first frame is not held
/// up by metadata probing.
pub fn spawn_folder_load(ingestor: Ingestor, folder: PathBuf) -> FolderLoad {
    let (events_tx, events) = mpsc::channel();
    let (done_tx, done) = mpsc::channel();

    let spawned = thread::Builder::new()
        .name("lilt-ingest".into())
        .spawn(move || {
            let catalog = ingestor.load_folder(&folder, Some(&events_tx));
            let _ = done_tx.send((folder, catalog));
        });
    if let Err(e) = spawned {
        tracing::error!("could not start folder load: {e}");
    }

    FolderLoad { events, done }
}
