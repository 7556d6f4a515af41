use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/turkamp/config.toml` or `~/.config/turkamp/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TURKAMP__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
///
/// These are static preferences. Everything the user changes while the player
/// runs (volume, theme, playlist...) lives in the session record instead.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub session: SessionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
    /// How often the audio thread reports the playback position (milliseconds).
    pub position_interval_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 300,
            position_interval_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Title shown on the display panel before anything has played.
    pub header_text: String,
    /// Milliseconds between two steps of the now-playing marquee.
    pub scroll_tick_ms: u64,
    /// Milliseconds between two spectrum animation frames.
    pub spectrum_tick_ms: u64,
    /// Number of bars drawn by the spectrum.
    pub spectrum_bars: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: "Turka Music Player - Ready".to_string(),
            scroll_tick_ms: 120,
            spectrum_tick_ms: 40,
            spectrum_bars: 35,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Milliseconds to jump when pressing `H` / `L`.
    pub seek_step_ms: u64,
    /// Volume points added or removed by `+` / `-`.
    pub volume_step: i32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_step_ms: 5_000,
            volume_step: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks when a folder is added.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles) when a folder is added.
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: [
                "mp3", "wav", "flac", "m4a", "mpga", "aac", "ogg", "opus", "wma", "m4b", "aiff",
                "mid", "amr",
            ]
            .iter()
            .map(|e| e.to_string())
            .collect(),
            follow_links: true,
            include_hidden: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Explicit location of the session record. When unset the XDG default is used.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    /// Log file. Defaults to `turkamp.log` in the system temp directory.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
