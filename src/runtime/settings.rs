use std::env;
use std::fs::File;
use std::path::PathBuf;

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::config::{self, LoggingSettings};

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("turkamp: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("turkamp: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

pub(crate) fn level_filter(level: &str) -> LevelFilter {
    let level = level.trim();
    if level.eq_ignore_ascii_case("warning") {
        return LevelFilter::Warn;
    }
    level.parse().unwrap_or(LevelFilter::Info)
}

pub(crate) fn log_file_path(logging: &LoggingSettings) -> PathBuf {
    logging
        .file
        .clone()
        .unwrap_or_else(|| env::temp_dir().join("turkamp.log"))
}

/// Route `log` output to a file so it never lands on the TUI.
/// Failing to open the file just leaves logging off.
pub fn init_logging(logging: &LoggingSettings) {
    let level = level_filter(&logging.level);
    if level == LevelFilter::Off {
        return;
    }

    let path = log_file_path(logging);
    let file = match File::create(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("turkamp: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    if WriteLogger::init(level, Config::default(), file).is_err() {
        eprintln!("turkamp: logger already initialised");
    }
}
