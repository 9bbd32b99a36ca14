use super::*;
use std::path::PathBuf;

#[test]
fn missing_file_reads_as_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = TomlStore::open(dir.path().join("state.toml"));

    assert_eq!(store.volume(), 1.0);
    assert_eq!(store.play_mode(), 1);
    assert!(!store.muted());
    assert_eq!(store.background_index(), -1);
    assert!(store.music_folder().is_none());
    assert!(store.background_image().is_none());
    assert!(store.background_images().is_empty());
    assert!(!dir.path().join("state.toml").exists());
}

#[test]
fn values_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.toml");

    let mut store = TomlStore::open(&path);
    store.set_music_folder(PathBuf::from("/music/jazz")).unwrap();
    store.set_play_mode(3).unwrap();
    store.set_volume(0.25).unwrap();
    store.set_muted(true).unwrap();
    store
        .set_background_images(vec![PathBuf::from("/img/a.png"), PathBuf::from("/img/b.png")])
        .unwrap();
    store.set_background_index(1).unwrap();
    store
        .set_background_image(Some(PathBuf::from("/img/b.png")))
        .unwrap();

    let reopened = TomlStore::open(&path);
    assert_eq!(reopened.music_folder(), Some(PathBuf::from("/music/jazz")));
    assert_eq!(reopened.play_mode(), 3);
    assert_eq!(reopened.volume(), 0.25);
    assert!(reopened.muted());
    assert_eq!(reopened.background_images().len(), 2);
    assert_eq!(reopened.background_index(), 1);
    assert_eq!(reopened.background_image(), Some(PathBuf::from("/img/b.png")));
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.toml");
    std::fs::write(&path, "volume = \"loud\"\n[[[").unwrap();

    let store = TomlStore::open(&path);
    assert_eq!(store.state(), &PersistedState::default());
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.toml");
    std::fs::write(&path, "play_mode = 2\n").unwrap();

    let store = TomlStore::open(&path);
    assert_eq!(store.play_mode(), 2);
    assert_eq!(store.volume(), 1.0);
    assert_eq!(store.background_index(), -1);
}

#[test]
fn volume_is_clamped() {
    let mut store = TomlStore::in_memory();
    store.set_volume(4.0).unwrap();
    assert_eq!(store.volume(), 1.0);
    store.set_volume(-1.0).unwrap();
    assert_eq!(store.volume(), 0.0);
}

#[test]
fn in_memory_store_has_no_file() {
    let mut store = TomlStore::in_memory();
    store.set_play_mode(0).unwrap();
    assert!(store.path().is_none());
    assert_eq!(store.play_mode(), 0);
}
