//! The "now playing" slot and the next/previous policy.
//!
//! The controller never owns tracks: `current_track` is an index into the
//! `Playlist` handed to each operation. Position and duration are mirrored
//! from engine notifications and are informational only.

use rand::RngExt;

use crate::audio::{AudioEngine, EngineEvent};
use crate::playlist::Playlist;

/// The playback state of the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

pub const MAX_VOLUME: u8 = 100;
pub const DEFAULT_VOLUME: u8 = 75;

type IndexPicker = Box<dyn FnMut(usize) -> usize>;

pub struct PlaybackController<E: AudioEngine> {
    engine: E,
    state: PlaybackState,
    current_track: Option<usize>,
    has_source: bool,
    title: Option<String>,
    position_ms: u64,
    duration_ms: u64,
    volume: u8,
    shuffled: bool,
    repeated: bool,
    pick_index: IndexPicker,
}

fn random_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    rand::rng().random_range(0..len)
}

impl<E: AudioEngine> PlaybackController<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            state: PlaybackState::Stopped,
            current_track: None,
            has_source: false,
            title: None,
            position_ms: 0,
            duration_ms: 0,
            volume: DEFAULT_VOLUME,
            shuffled: false,
            repeated: false,
            pick_index: Box::new(random_index),
        }
    }

    /// Replace the random source used by shuffle. `pick(len)` must return a value below `len`.
    #[cfg(test)]
    pub fn with_shuffle_picker(mut self, pick: impl FnMut(usize) -> usize + 'static) -> Self {
        self.pick_index = Box::new(pick);
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_track(&self) -> Option<usize> {
        self.current_track
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    /// Start the track at `index`.
    ///
    /// The file is re-checked on disk first; when it is gone (or `index` is out
    /// of range) nothing happens and `false` is returned.
    pub fn play_track(&mut self, playlist: &mut Playlist, index: usize) -> bool {
        let Some(track) = playlist.get(index) else {
            log::debug!("play_track: index {index} out of range");
            return false;
        };
        if !track.exists() {
            log::warn!("skipping missing file {}", track.path.display());
            return false;
        }

        let path = track.path.clone();
        let title = track.display.clone();

        self.engine.load(&path);
        self.engine.play();

        log::info!("playing #{index}: {title}");
        self.state = PlaybackState::Playing;
        self.current_track = Some(index);
        self.has_source = true;
        self.title = Some(title);
        self.position_ms = 0;
        self.duration_ms = 0;
        playlist.set_current_index(index);
        true
    }

    /// Pause when playing. Otherwise resume, or start the selected (or first)
    /// track when nothing has been loaded yet.
    ///
    /// Returns `true` when a new track was started.
    pub fn toggle_play_pause(&mut self, playlist: &mut Playlist) -> bool {
        if self.state == PlaybackState::Playing {
            self.pause();
            return false;
        }
        self.play(playlist)
    }

    /// Resume or start playback. Returns `true` when a new track was started.
    pub fn play(&mut self, playlist: &mut Playlist) -> bool {
        match self.state {
            PlaybackState::Playing => false,
            _ if !self.has_source => {
                if playlist.is_empty() {
                    return false;
                }
                let index = playlist.current_index().unwrap_or(0);
                playlist.set_current_index(index);
                self.play_track(playlist, index)
            }
            _ => {
                self.engine.play();
                self.state = PlaybackState::Playing;
                false
            }
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.engine.pause();
            self.state = PlaybackState::Paused;
        }
    }

    pub fn stop(&mut self) {
        if self.state == PlaybackState::Stopped {
            return;
        }
        self.engine.stop();
        self.state = PlaybackState::Stopped;
        self.position_ms = 0;
    }

    /// Advance: a random index under shuffle (the current track may come up
    /// again), otherwise the following row, wrapping at the end.
    ///
    /// The cursor moves even when the target file turns out to be missing, so
    /// repeated calls step past dead entries.
    pub fn next(&mut self, playlist: &mut Playlist) -> bool {
        let len = playlist.len();
        if len == 0 {
            return false;
        }

        let index = if self.shuffled {
            (self.pick_index)(len).min(len - 1)
        } else {
            playlist.current_index().map_or(0, |c| (c + 1) % len)
        };

        playlist.set_current_index(index);
        self.play_track(playlist, index)
    }

    /// Step back one row, wrapping to the end. Shuffle is not consulted.
    pub fn previous(&mut self, playlist: &mut Playlist) -> bool {
        let len = playlist.len();
        if len == 0 {
            return false;
        }

        let index = match playlist.current_index() {
            Some(c) => (c as i64 - 1).rem_euclid(len as i64) as usize,
            None => len - 1,
        };

        playlist.set_current_index(index);
        self.play_track(playlist, index)
    }

    /// Move the position by `delta_ms`, clamped to the known duration.
    pub fn seek_relative(&mut self, delta_ms: i64) {
        let target = (self.position_ms as i64).saturating_add(delta_ms);
        self.seek_to(target.max(0) as u64);
    }

    /// Jump to `position_ms`. A duration of 0 means unknown, so no upper clamp.
    pub fn seek_to(&mut self, position_ms: u64) {
        if !self.has_source {
            return;
        }
        let target = if self.duration_ms == 0 {
            position_ms
        } else {
            position_ms.min(self.duration_ms)
        };
        self.engine.set_position(target);
        self.position_ms = target;
    }

    /// The engine finished the current source: repeat it or move on.
    pub fn on_end_of_media(&mut self, playlist: &mut Playlist) {
        if self.repeated && self.current_track.is_some() {
            self.engine.set_position(0);
            self.engine.play();
            self.position_ms = 0;
            self.state = PlaybackState::Playing;
            return;
        }

        if !self.next(playlist) {
            log::debug!("end of media and nothing else to play");
            self.state = PlaybackState::Stopped;
            self.position_ms = 0;
        }
    }

    pub fn on_position_changed(&mut self, position_ms: u64) {
        self.position_ms = position_ms;
    }

    pub fn on_duration_changed(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    pub fn on_state_changed(&mut self, state: PlaybackState) {
        self.state = state;
    }

    /// Route one engine notification. End-of-media needs the playlist to pick what's next.
    pub fn handle_engine_event(&mut self, event: EngineEvent, playlist: &mut Playlist) {
        match event {
            EngineEvent::PositionChanged(p) => self.on_position_changed(p),
            EngineEvent::DurationChanged(d) => self.on_duration_changed(d),
            EngineEvent::StateChanged(s) => self.on_state_changed(s),
            EngineEvent::EndOfMedia => self.on_end_of_media(playlist),
            EngineEvent::InvalidMedia => {
                self.state = PlaybackState::Stopped;
                self.has_source = false;
                self.position_ms = 0;
                self.duration_ms = 0;
            }
        }
    }

    pub fn set_shuffled(&mut self, shuffled: bool) {
        self.shuffled = shuffled;
    }

    pub fn set_repeated(&mut self, repeated: bool) {
        self.repeated = repeated;
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffled = !self.shuffled;
    }

    pub fn toggle_repeat(&mut self) {
        self.repeated = !self.repeated;
    }

    /// Set the volume in percent, clamped to `0..=100`.
    pub fn set_volume(&mut self, volume: i32) {
        self.volume = volume.clamp(0, i32::from(MAX_VOLUME)) as u8;
        self.engine
            .set_volume(f32::from(self.volume) / f32::from(MAX_VOLUME));
    }

    pub fn change_volume_by(&mut self, delta: i32) {
        self.set_volume(i32::from(self.volume).saturating_add(delta));
    }

    /// Keep `current_track` pointing at the same track after row `index` was removed.
    pub fn on_track_removed(&mut self, index: usize) {
        self.current_track = match self.current_track {
            Some(c) if c == index => None,
            Some(c) if c > index => Some(c - 1),
            other => other,
        };
    }

    /// Forget the playlist position of the playing track (the playlist was cleared).
    /// Whatever the engine is playing keeps playing.
    pub fn detach(&mut self) {
        self.current_track = None;
    }
}
