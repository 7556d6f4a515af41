//! Ordered track list with a selection cursor and a display filter.
//!
//! Insertion order is the traversal order used by next/previous. The filter
//! only hides rows in the UI: it never removes tracks and is never consulted
//! when picking the next or previous track.

use std::path::{Path, PathBuf};

use crate::config::LibrarySettings;
use crate::library::{self, Track};

pub struct Playlist {
    tracks: Vec<Track>,
    visible: Vec<bool>,
    current: Option<usize>,
    filter_text: String,
    library: LibrarySettings,
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new(LibrarySettings::default())
    }
}

impl Playlist {
    /// Create an empty playlist accepting the extensions listed in `library`.
    pub fn new(library: LibrarySettings) -> Self {
        Self {
            tracks: Vec::new(),
            visible: Vec::new(),
            current: None,
            filter_text: String::new(),
            library,
        }
    }

    /// Append a track for `path` when its extension is a recognized audio format.
    ///
    /// Returns whether the track was added.
    pub fn add(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if !library::is_audio_file(path, &self.library) {
            log::debug!("ignoring non-audio path {}", path.display());
            return false;
        }

        let track = Track::from_path(path);
        self.visible.push(matches_filter(&track, &self.filter_text));
        self.tracks.push(track);
        true
    }

    /// Recursively add every audio file below `dir`. Returns how many were added.
    pub fn add_directory(&mut self, dir: impl AsRef<Path>) -> usize {
        library::audio_files_in(dir.as_ref(), &self.library)
            .into_iter()
            .filter(|p| self.add(p))
            .count()
    }

    /// Entry point for dropped or typed paths: folders are walked, existing
    /// files are added, anything else is skipped.
    pub fn add_dropped(&mut self, path: impl AsRef<Path>) -> usize {
        let path = path.as_ref();
        if path.is_dir() {
            self.add_directory(path)
        } else if path.is_file() {
            usize::from(self.add(path))
        } else {
            log::debug!("skipping missing path {}", path.display());
            0
        }
    }

    /// Remove the track at `index`. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.tracks.len() {
            return false;
        }

        self.tracks.remove(index);
        self.visible.remove(index);

        self.current = match self.current {
            Some(c) if c > index => Some(c - 1),
            Some(c) if c == index => {
                if self.tracks.is_empty() {
                    None
                } else {
                    Some(c.min(self.tracks.len() - 1))
                }
            }
            other => other,
        };
        true
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.visible.clear();
        self.current = None;
    }

    /// Store `text` and recompute which rows are shown.
    pub fn set_filter(&mut self, text: &str) {
        self.filter_text = text.to_string();
        self.visible = self
            .tracks
            .iter()
            .map(|t| matches_filter(t, &self.filter_text))
            .collect();
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Move the cursor to `index`. Out-of-range values are ignored.
    pub fn set_current_index(&mut self, index: usize) {
        if index < self.tracks.len() {
            self.current = Some(index);
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// Indices of the rows the current filter lets through, in playlist order.
    pub fn visible_indices(&self) -> Vec<usize> {
        (0..self.tracks.len()).filter(|&i| self.is_visible(i)).collect()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.tracks.iter().map(|t| t.path.clone()).collect()
    }
}

fn matches_filter(track: &Track, text: &str) -> bool {
    text.is_empty() || track.display.to_lowercase().contains(&text.to_lowercase())
}
