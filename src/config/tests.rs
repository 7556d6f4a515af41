use super::load::{config_home, resolve_config_path, resolve_session_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
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
fn resolve_config_path_prefers_turkamp_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TURKAMP_CONFIG_PATH", "/tmp/turkamp-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/turkamp-test-config.toml")
    );
}

#[test]
fn config_home_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(config_home().unwrap(), PathBuf::from("/tmp/xdg-config-home"));
}

#[test]
fn config_home_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        config_home().unwrap(),
        PathBuf::from("/tmp/home-dir").join(".config")
    );
}

#[test]
fn session_path_precedence_env_then_setting_then_xdg() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg");
    let _g2 = EnvGuard::remove("TURKAMP_SESSION_PATH");

    assert_eq!(
        resolve_session_path(None).unwrap(),
        PathBuf::from("/tmp/xdg").join("turkamp").join("session.toml")
    );

    let configured = PathBuf::from("/tmp/configured-session.toml");
    assert_eq!(resolve_session_path(Some(&configured)).unwrap(), configured);

    let _g3 = EnvGuard::set("TURKAMP_SESSION_PATH", "/tmp/env-session.toml");
    assert_eq!(
        resolve_session_path(Some(&configured)).unwrap(),
        PathBuf::from("/tmp/env-session.toml")
    );
}

#[test]
fn default_extensions_cover_the_supported_formats() {
    let lib = LibrarySettings::default();
    for ext in ["mp3", "wav", "flac", "m4a", "aac", "ogg", "opus", "wma", "m4b", "aiff", "mid", "amr"] {
        assert!(lib.extensions.iter().any(|e| e == ext), "missing {ext}");
    }
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
quit_fade_out_ms = 0

[controls]
seek_step_ms = 10000
volume_step = 2

[ui]
header_text = "hello"
spectrum_bars = 12

[library]
extensions = ["mp3"]
include_hidden = false

[session]
path = "/tmp/elsewhere/session.toml"

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TURKAMP_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TURKAMP__CONTROLS__SEEK_STEP_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.audio.position_interval_ms, 200);
    assert_eq!(s.controls.seek_step_ms, 10_000);
    assert_eq!(s.controls.volume_step, 2);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.spectrum_bars, 12);
    assert_eq!(s.ui.scroll_tick_ms, UiSettings::default().scroll_tick_ms);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.include_hidden);
    assert!(s.library.follow_links);
    assert_eq!(
        s.session.path,
        Some(PathBuf::from("/tmp/elsewhere/session.toml"))
    );
    assert_eq!(s.logging.level, "debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[controls]
seek_step_ms = 5000
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TURKAMP_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TURKAMP__CONTROLS__SEEK_STEP_MS", "1000");

    let s = Settings::load().unwrap();
    assert_eq!(s.controls.seek_step_ms, 1000);
}

#[test]
fn validate_rejects_degenerate_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.ui.spectrum_bars = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.extensions = vec!["  ".to_string()];
    assert!(s.validate().is_err());
}
