use std::path::{Path, PathBuf};

/// One playable audio file reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    /// File name portion of `path`, shown in the playlist and the marquee.
    pub display: String,
}

impl Track {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let display = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            path: path.to_path_buf(),
            display,
        }
    }

    /// Whether the file is still present on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}
