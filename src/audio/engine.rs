//! The seam between the playback core and whatever actually makes sound.
//!
//! `PlaybackController` only talks to an `AudioEngine`; the engine reports
//! back asynchronously through `EngineEvent` messages which the event loop
//! feeds to the controller on the UI thread.

use std::path::Path;

use crate::player::PlaybackState;

/// Transport operations the playback core relays to the audio backend.
pub trait AudioEngine {
    /// Replace the current source with the file at `path`.
    fn load(&mut self, path: &Path);
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    /// Jump to `position_ms` in the current source.
    fn set_position(&mut self, position_ms: u64);
    /// Output gain in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);
}

/// Notifications emitted by the audio backend.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    PositionChanged(u64),
    DurationChanged(u64),
    StateChanged(PlaybackState),
    /// The current source played to its end.
    EndOfMedia,
    /// The loaded source could not be opened or decoded.
    InvalidMedia,
}
