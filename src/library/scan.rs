use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

/// True when `path` ends in one of the configured audio extensions (case-insensitive).
pub fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();

    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .any(|e| !e.is_empty() && e == ext)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Recursively collect audio files under `dir`.
///
/// Inside each directory, files come first in lexicographic order, then the
/// subdirectories (also lexicographic) are descended into. Entries that cannot
/// be read are skipped; a missing `dir` yields an empty list.
pub fn audio_files_in(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        });

    walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && is_audio_file(e.path(), settings))
        .map(|e| e.into_path())
        .collect()
}
