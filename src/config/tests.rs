use super::load::{default_config_path, default_state_dir, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_lilt_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("LILT_CONFIG_PATH", "/tmp/lilt-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/lilt-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("lilt")
            .join("config.toml")
    );
}

#[test]
fn default_state_dir_falls_back_to_home_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_state_dir().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".local/state")
            .join("lilt")
    );
}

#[test]
fn defaults_match_the_documented_values() {
    let s = Settings::default();
    assert_eq!(
        s.library.extensions,
        vec!["mp3", "m4a", "wav", "flac", "ogg"]
    );
    assert!(!s.library.include_hidden);
    assert_eq!(s.library.probe_timeout_ms, 5000);
    assert_eq!(s.playback.tick_ms, 50);
    assert_eq!(s.log.filter, "info");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
extensions = ["flac"]
include_hidden = true
probe_timeout_ms = 750

[playback]
tick_ms = 100
volume_step = 10
scrub_seconds = 15

[state]
path = "/tmp/lilt-state.toml"

[log]
filter = "lilt=debug"
dir = "/tmp/lilt-logs"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("LILT_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("LILT__LIBRARY__PROBE_TIMEOUT_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.extensions, vec!["flac".to_string()]);
    assert!(s.library.include_hidden);
    assert_eq!(s.library.probe_timeout_ms, 750);
    assert_eq!(s.playback.tick_ms, 100);
    assert_eq!(s.playback.volume_step, 10);
    assert_eq!(s.playback.scrub_seconds, 15);
    assert_eq!(
        s.state_path(),
        Some(std::path::PathBuf::from("/tmp/lilt-state.toml"))
    );
    assert_eq!(s.log.filter, "lilt=debug");
    assert_eq!(s.log_dir(), Some(std::path::PathBuf::from("/tmp/lilt-logs")));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
probe_timeout_ms = 750
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("LILT_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("LILT__LIBRARY__PROBE_TIMEOUT_MS", "20");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.probe_timeout_ms, 20);
}

#[test]
fn validate_rejects_zero_timeouts() {
    let mut s = Settings::default();
    s.library.probe_timeout_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.tick_ms = 0;
    assert!(s.validate().is_err());
}
