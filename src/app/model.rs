//! Application model types: `App`, `Preferences` and `InputMode`.
//!
//! `App` owns every piece of mutable player state. Nothing else keeps a copy:
//! the event loop borrows it to draw and hands it commands and engine events.

use std::path::Path;

use crate::audio::{AudioEngine, EngineEvent};
use crate::player::PlaybackController;
use crate::playlist::Playlist;
use crate::session::{SessionRecord, SessionStore};
use crate::ui::spectrum;
use crate::ui::theme::THEMES;

use super::command::Command;

/// Look-and-feel choices persisted with the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    /// Index into the theme table.
    pub theme_index: usize,
    pub is_dark: bool,
    pub is_list_visible: bool,
    pub spectrum_mode: u8,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme_index: 0,
            is_dark: true,
            is_list_visible: false,
            spectrum_mode: 0,
        }
    }
}

/// What typed characters currently feed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Characters edit the playlist filter live.
    Filter,
    /// Characters build a path to add on enter.
    AddPath,
}

/// The main application model.
pub struct App<E: AudioEngine> {
    pub playlist: Playlist,
    pub player: PlaybackController<E>,
    pub prefs: Preferences,
    pub input_mode: InputMode,
    pub input: String,
    store: SessionStore,
}

impl<E: AudioEngine> App<E> {
    pub fn new(playlist: Playlist, player: PlaybackController<E>, store: SessionStore) -> Self {
        Self {
            playlist,
            player,
            prefs: Preferences::default(),
            input_mode: InputMode::Normal,
            input: String::new(),
            store,
        }
    }

    /// Apply one command. Returns `true` when the app should quit.
    ///
    /// Commands that change anything worth restoring write the session
    /// before returning.
    pub fn dispatch(&mut self, cmd: Command) -> bool {
        log::trace!("dispatch {cmd:?}");
        let changed = match cmd {
            Command::Quit => return true,
            Command::PlayPause => self.player.toggle_play_pause(&mut self.playlist),
            Command::Play => self.player.play(&mut self.playlist),
            Command::Pause => {
                self.player.pause();
                false
            }
            Command::Stop => {
                self.player.stop();
                false
            }
            Command::Next => self.player.next(&mut self.playlist),
            Command::Previous => self.player.previous(&mut self.playlist),
            Command::PlaySelected => match self.playlist.current_index() {
                Some(i) => self.player.play_track(&mut self.playlist, i),
                None => false,
            },
            Command::SeekBy(delta_ms) => {
                self.player.seek_relative(delta_ms);
                false
            }
            Command::SeekTo(position_ms) => {
                self.player.seek_to(position_ms);
                false
            }
            Command::SetVolume(v) => {
                self.player.set_volume(v);
                true
            }
            Command::ChangeVolume(delta) => {
                self.player.change_volume_by(delta);
                true
            }
            Command::ToggleShuffle => {
                self.player.toggle_shuffle();
                true
            }
            Command::ToggleRepeat => {
                self.player.toggle_repeat();
                true
            }
            Command::CycleTheme => {
                self.prefs.theme_index = (self.prefs.theme_index + 1) % THEMES.len();
                true
            }
            Command::ToggleDarkMode => {
                self.prefs.is_dark = !self.prefs.is_dark;
                true
            }
            Command::ToggleListVisible => {
                self.prefs.is_list_visible = !self.prefs.is_list_visible;
                true
            }
            Command::CycleSpectrumMode => {
                self.prefs.spectrum_mode = (self.prefs.spectrum_mode + 1) % spectrum::MODE_COUNT;
                true
            }
            Command::SelectNext => {
                self.move_cursor(true);
                false
            }
            Command::SelectPrevious => {
                self.move_cursor(false);
                false
            }
            Command::AddPaths(paths) => {
                let added: usize = paths.iter().map(|p| self.playlist.add_dropped(p)).sum();
                log::info!("added {added} track(s)");
                added > 0
            }
            Command::RemoveSelected => match self.playlist.current_index() {
                Some(i) => self.remove(i),
                None => false,
            },
            Command::Clear => {
                self.playlist.clear();
                self.player.detach();
                true
            }
            Command::SetFilter(text) => {
                self.playlist.set_filter(&text);
                false
            }
        };

        if changed {
            self.persist();
        }
        false
    }

    /// Route an engine notification. Auto-advance at end of media is saved
    /// like any other track change.
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        let before = (self.player.current_track(), self.playlist.current_index());
        let ended = matches!(event, EngineEvent::EndOfMedia);
        self.player.handle_engine_event(event, &mut self.playlist);

        if ended && before != (self.player.current_track(), self.playlist.current_index()) {
            self.persist();
        }
    }

    fn remove(&mut self, index: usize) -> bool {
        if !self.playlist.remove(index) {
            return false;
        }
        self.player.on_track_removed(index);
        true
    }

    /// Return the next visible index after `current`, wrapping around.
    pub fn next_in_view_from(&self, current: Option<usize>) -> Option<usize> {
        let display = self.playlist.visible_indices();
        if display.is_empty() {
            return None;
        }

        let pos = current.and_then(|c| display.iter().position(|&i| i == c));
        match pos {
            Some(p) => Some(display[(p + 1) % display.len()]),
            None => Some(display[0]),
        }
    }

    /// Return the previous visible index before `current`, wrapping around.
    pub fn prev_in_view_from(&self, current: Option<usize>) -> Option<usize> {
        let display = self.playlist.visible_indices();
        if display.is_empty() {
            return None;
        }

        let pos = current.and_then(|c| display.iter().position(|&i| i == c));
        match pos {
            Some(0) | None => Some(display[display.len() - 1]),
            Some(p) => Some(display[p - 1]),
        }
    }

    fn move_cursor(&mut self, forward: bool) {
        let current = self.playlist.current_index();
        let target = if forward {
            self.next_in_view_from(current)
        } else {
            self.prev_in_view_from(current)
        };
        if let Some(i) = target {
            self.playlist.set_current_index(i);
        }
    }

    /// The record that `persist` writes.
    pub fn snapshot(&self) -> SessionRecord {
        SessionRecord {
            theme_index: self.prefs.theme_index as i64,
            volume: i64::from(self.player.volume()),
            is_dark: self.prefs.is_dark,
            is_shuffled: self.player.is_shuffled(),
            is_repeated: self.player.is_repeated(),
            is_list_visible: self.prefs.is_list_visible,
            current_index: self.playlist.current_index().map_or(-1, |i| i as i64),
            spectrum_mode: i64::from(self.prefs.spectrum_mode),
            playlist: self
                .playlist
                .paths()
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }

    /// Apply a loaded record. Out-of-range values are wrapped or clamped, and
    /// playlist entries whose file has disappeared are dropped.
    pub fn restore(&mut self, record: &SessionRecord) {
        self.prefs = Preferences {
            theme_index: record.theme_index.rem_euclid(THEMES.len() as i64) as usize,
            is_dark: record.is_dark,
            is_list_visible: record.is_list_visible,
            spectrum_mode: record.spectrum_mode.rem_euclid(i64::from(spectrum::MODE_COUNT)) as u8,
        };

        self.player.set_volume(record.volume.clamp(0, 100) as i32);
        self.player.set_shuffled(record.is_shuffled);
        self.player.set_repeated(record.is_repeated);

        self.playlist.clear();
        self.player.detach();
        for p in &record.playlist {
            let path = Path::new(p);
            if path.is_file() {
                self.playlist.add(path);
            } else {
                log::info!("dropping vanished track {p}");
            }
        }

        if let Ok(i) = usize::try_from(record.current_index) {
            self.playlist.set_current_index(i);
        }
    }

    /// Load the stored session into the app.
    pub fn restore_from_store(&mut self) {
        let record = self.store.load();
        self.restore(&record);
    }

    pub fn persist(&self) {
        self.store.save(&self.snapshot());
    }

    /// Save unconditionally; called once on the way out.
    pub fn shutdown(&self) {
        self.persist();
    }

    /// Text for the now-playing marquee.
    pub fn now_playing<'a>(&'a self, idle_text: &'a str) -> &'a str {
        self.player.title().unwrap_or(idle_text)
    }
}
