use crate::app::App;
use crate::audio::AudioEngine;
use crate::mpris::MprisHandle;
use crate::player::PlaybackState;

/// The parts of `App` MPRIS clients can see. Compared between frames so the
/// shared state is only touched on change.
#[derive(Debug, Clone, PartialEq)]
pub struct MprisView {
    playback: PlaybackState,
    track: Option<usize>,
    duration_ms: u64,
    shuffle: bool,
    repeat: bool,
    volume: u8,
}

impl MprisView {
    pub fn of<E: AudioEngine>(app: &App<E>) -> Self {
        Self {
            playback: app.player.state(),
            track: app.player.current_track(),
            duration_ms: app.player.duration_ms(),
            shuffle: app.player.is_shuffled(),
            repeat: app.player.is_repeated(),
            volume: app.player.volume(),
        }
    }
}

pub fn update_mpris<E: AudioEngine>(mpris: &MprisHandle, app: &App<E>) {
    let track = app
        .player
        .current_track()
        .and_then(|i| app.playlist.get(i))
        .map(|t| (t.display.as_str(), t.path.as_path()));

    mpris.set_track(track, app.player.duration_ms());
    mpris.set_playback(app.player.state());
    mpris.set_modes(app.player.is_shuffled(), app.player.is_repeated());
    mpris.set_volume(app.player.volume());
}
