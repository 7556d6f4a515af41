use std::path::PathBuf;

use crate::app::{App, Command};
use crate::audio::AudioEngine;
use crate::config::{self, resolve_session_path};
use crate::player::PlaybackController;
use crate::playlist::Playlist;
use crate::session::SessionStore;

/// Build the app around `engine`, restore the last session and queue up any
/// paths given on the command line.
pub fn build_app<E: AudioEngine>(engine: E, settings: &config::Settings, args: Vec<PathBuf>) -> App<E> {
    let store = match resolve_session_path(settings.session.path.as_ref()) {
        Some(path) => SessionStore::new(path),
        None => {
            log::warn!("no config directory; session will not be saved");
            SessionStore::disabled()
        }
    };

    if let Some(path) = store.path() {
        log::info!("session file: {}", path.display());
    }

    let playlist = Playlist::new(settings.library.clone());
    let mut app = App::new(playlist, PlaybackController::new(engine), store);
    app.restore_from_store();

    if !args.is_empty() {
        app.dispatch(Command::AddPaths(args));
    }

    log::info!(
        "startup: {} track(s), volume {}",
        app.playlist.len(),
        app.player.volume()
    );
    app
}
