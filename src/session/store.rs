use std::fs;
use std::path::{Path, PathBuf};

use super::record::SessionRecord;

#[derive(Debug, thiserror::Error)]
pub(crate) enum SessionError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed session record {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("cannot serialize session record: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Reads and writes the session record at a fixed location.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: Option<PathBuf>,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A store with nowhere to write: loads defaults, saves nothing.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load the record, falling back to defaults on any error.
    pub fn load(&self) -> SessionRecord {
        let Some(path) = self.path.as_deref() else {
            return SessionRecord::default();
        };
        if !path.exists() {
            log::info!("no session at {}, starting fresh", path.display());
            return SessionRecord::default();
        }

        match read_record(path) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("{e}; using default session");
                SessionRecord::default()
            }
        }
    }

    /// Write the record. Failures are logged and otherwise ignored.
    pub fn save(&self, record: &SessionRecord) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        if let Err(e) = write_record(path, record) {
            log::warn!("session not saved: {e}");
        }
    }
}

fn read_record(path: &Path) -> Result<SessionRecord, SessionError> {
    let text = fs::read_to_string(path).map_err(|source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| SessionError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_record(path: &Path, record: &SessionRecord) -> Result<(), SessionError> {
    let text = toml::to_string_pretty(record)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SessionError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, text).map_err(|source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    })
}
