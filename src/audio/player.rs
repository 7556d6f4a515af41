use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;

use super::engine::{AudioEngine, EngineEvent};
use super::thread::spawn_audio_thread;
use super::types::AudioCmd;

/// `rodio`-backed engine. Every call is a message to the audio thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    join: Option<JoinHandle<()>>,
}

impl AudioPlayer {
    /// Spawn the audio thread. Engine notifications arrive on the returned receiver.
    pub fn new(audio_settings: AudioSettings) -> (Self, Receiver<EngineEvent>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<EngineEvent>();

        let audio_handle = spawn_audio_thread(rx, events_tx, audio_settings);

        let player = Self {
            tx,
            join: Some(audio_handle),
        };
        (player, events_rx)
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            log::warn!("audio thread is gone, dropping {:?}", e.0);
        }
    }

    /// Fade out, stop the audio thread and wait for it to finish.
    pub fn quit_softly(&mut self, fade_out: Duration) {
        let fade_out_ms = u64::try_from(fade_out.as_millis()).unwrap_or(u64::MAX);
        self.send(AudioCmd::Quit { fade_out_ms });

        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl AudioEngine for AudioPlayer {
    fn load(&mut self, path: &Path) {
        self.send(AudioCmd::Load(path.to_path_buf()));
    }

    fn play(&mut self) {
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn stop(&mut self) {
        self.send(AudioCmd::Stop);
    }

    fn set_position(&mut self, position_ms: u64) {
        self.send(AudioCmd::Seek(Duration::from_millis(position_ms)));
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(AudioCmd::SetVolume(volume));
    }
}
