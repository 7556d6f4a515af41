use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `TURKAMP__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("TURKAMP")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.ui.scroll_tick_ms == 0 || self.ui.spectrum_tick_ms == 0 {
            return Err("ui tick intervals must be >= 1 ms".to_string());
        }
        if self.ui.spectrum_bars == 0 {
            return Err("ui.spectrum_bars must be >= 1".to_string());
        }
        if self.audio.position_interval_ms == 0 {
            return Err("audio.position_interval_ms must be >= 1".to_string());
        }
        if self.library.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err("library.extensions must name at least one extension".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `TURKAMP_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("TURKAMP_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    config_home().map(|d| d.join("turkamp").join("config.toml"))
}

/// Resolve the session record path: `TURKAMP_SESSION_PATH`, then the configured
/// path, then `$XDG_CONFIG_HOME/turkamp/session.toml`.
pub fn resolve_session_path(configured: Option<&PathBuf>) -> Option<PathBuf> {
    if let Some(p) = env::var_os("TURKAMP_SESSION_PATH") {
        return Some(PathBuf::from(p));
    }
    if let Some(p) = configured {
        return Some(p.clone());
    }
    config_home().map(|d| d.join("turkamp").join("session.toml"))
}

/// `$XDG_CONFIG_HOME`, or `~/.config` when it is not set.
pub fn config_home() -> Option<PathBuf> {
    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    }
}
