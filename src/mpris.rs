use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use zbus::{Connection, interface};
use zvariant::{OwnedObjectPath, OwnedValue, Value};

use crate::app::Command;
use crate::player::PlaybackState;

const BUS_NAME: &str = "org.mpris.MediaPlayer2.turkamp";

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    title: Option<String>,
    url: Option<String>,
    length_micros: Option<i64>,
    shuffle: bool,
    repeat: bool,
    volume: f64,
}

/// Event-thread side of the MPRIS service: pushes state the bus reads back.
pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    /// Describe the loaded track, or clear the metadata with `None`.
    pub fn set_track(&self, track: Option<(&str, &Path)>, length_ms: u64) {
        if let Ok(mut s) = self.state.lock() {
            match track {
                Some((title, path)) => {
                    s.title = Some(title.to_string());
                    s.url = Some(format!("file://{}", path.display()));
                    s.length_micros = (length_ms > 0)
                        .then(|| i64::try_from(length_ms.saturating_mul(1000)).unwrap_or(i64::MAX));
                }
                None => {
                    s.title = None;
                    s.url = None;
                    s.length_micros = None;
                }
            }
        }
    }

    pub fn set_modes(&self, shuffle: bool, repeat: bool) {
        if let Ok(mut s) = self.state.lock() {
            s.shuffle = shuffle;
            s.repeat = repeat;
        }
    }

    /// Volume in percent.
    pub fn set_volume(&self, percent: u8) {
        if let Ok(mut s) = self.state.lock() {
            s.volume = f64::from(percent) / 100.0;
        }
    }
}

fn send(tx: &Sender<Command>, cmd: Command) {
    if tx.send(cmd).is_err() {
        log::debug!("MPRIS: event loop is gone");
    }
}

struct RootIface {
    tx: Sender<Command>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        send(&self.tx, Command::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "turkamp"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<Command>,
    state: Arc<Mutex<SharedState>>,
}

fn owned(value: Value<'_>) -> Option<OwnedValue> {
    OwnedValue::try_from(value).ok()
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        send(&self.tx, Command::Next);
    }

    fn previous(&self) {
        send(&self.tx, Command::Previous);
    }

    fn play(&self) {
        send(&self.tx, Command::Play);
    }

    fn pause(&self) {
        send(&self.tx, Command::Pause);
    }

    fn play_pause(&self) {
        send(&self.tx, Command::PlayPause);
    }

    fn stop(&self) {
        send(&self.tx, Command::Stop);
    }

    /// `offset` is in microseconds, relative to the current position.
    fn seek(&self, offset: i64) {
        send(&self.tx, Command::SeekBy(offset / 1000));
    }

    fn set_position(&self, _track_id: OwnedObjectPath, position: i64) {
        if position >= 0 {
            send(&self.tx, Command::SeekTo(position.unsigned_abs() / 1000));
        }
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn loop_status(&self) -> &str {
        match self.state.lock() {
            Ok(s) if s.repeat => "Track",
            _ => "None",
        }
    }

    #[zbus(property)]
    fn set_loop_status(&mut self, status: String) {
        let want = status != "None";
        if self.state.lock().is_ok_and(|s| s.repeat != want) {
            send(&self.tx, Command::ToggleRepeat);
        }
    }

    #[zbus(property)]
    fn shuffle(&self) -> bool {
        self.state.lock().is_ok_and(|s| s.shuffle)
    }

    #[zbus(property)]
    fn set_shuffle(&mut self, shuffle: bool) {
        if self.state.lock().is_ok_and(|s| s.shuffle != shuffle) {
            send(&self.tx, Command::ToggleShuffle);
        }
    }

    #[zbus(property)]
    fn volume(&self) -> f64 {
        self.state.lock().map_or(0.0, |s| s.volume)
    }

    #[zbus(property)]
    fn set_volume(&mut self, volume: f64) {
        let percent = (volume.clamp(0.0, 1.0) * 100.0).round() as i32;
        send(&self.tx, Command::SetVolume(percent));
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        let title = s.title.clone().unwrap_or_default();
        if let Some(v) = owned(Value::from(title)) {
            map.insert("xesam:title".to_string(), v);
        }
        if let Some(v) = s.url.clone().and_then(|u| owned(Value::from(u))) {
            map.insert("xesam:url".to_string(), v);
        }
        if let Some(v) = s.length_micros.and_then(|l| owned(Value::from(l))) {
            map.insert("mpris:length".to_string(), v);
        }
        map
    }
}

pub fn spawn_mpris(tx: Sender<Command>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let path = "/org/mpris/MediaPlayer2";

            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("MPRIS: failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection.request_name(BUS_NAME).await {
                log::warn!("MPRIS: failed to acquire name: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server.at(path, RootIface { tx: tx.clone() }).await {
                log::warn!("MPRIS: failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    path,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                log::warn!("MPRIS: failed to register player iface: {e}");
                return;
            }

            log::info!("MPRIS: serving {BUS_NAME}");
            // Keep the service alive.
            loop {
                Timer::after(std::time::Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}
