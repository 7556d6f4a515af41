use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;
use crate::player::PlaybackState;

use super::engine::EngineEvent;
use super::sink::{create_sink_at, fade_curve, probe_duration};
use super::types::AudioCmd;

/// What the audio thread is currently holding.
struct Deck {
    sink: Option<Sink>,
    path: Option<PathBuf>,
    paused: bool,
    volume: f32,
}

impl Deck {
    fn new() -> Self {
        Self {
            sink: None,
            path: None,
            paused: true,
            volume: 1.0,
        }
    }

    /// Rebuild the sink for the loaded path at `start_at`, keeping the pause state.
    fn rebuild_at(&mut self, stream: &OutputStream, start_at: Duration) -> bool {
        let Some(path) = self.path.clone() else {
            return false;
        };
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        match create_sink_at(stream, &path, start_at, self.volume) {
            Ok((sink, _)) => {
                if !self.paused {
                    sink.play();
                }
                self.sink = Some(sink);
                true
            }
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<EngineEvent>,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                log::error!("no audio output device, playback disabled: {e}");
                run_silent(rx, events);
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let tick = Duration::from_millis(audio_settings.position_interval_ms.max(1));
        let mut deck = Deck::new();

        loop {
            match rx.recv_timeout(tick) {
                Ok(AudioCmd::Load(path)) => {
                    if let Some(s) = deck.sink.take() {
                        s.stop();
                    }
                    deck.paused = true;
                    deck.path = None;

                    match create_sink_at(&stream, &path, Duration::ZERO, deck.volume) {
                        Ok((sink, decoded_total)) => {
                            log::info!("loaded {}", path.display());
                            let total = probe_duration(&path).or(decoded_total);
                            deck.sink = Some(sink);
                            deck.path = Some(path);
                            let _ = events.send(EngineEvent::PositionChanged(0));
                            if let Some(total) = total {
                                let _ = events.send(EngineEvent::DurationChanged(millis(total)));
                            }
                        }
                        Err(e) => {
                            log::warn!("{e}");
                            let _ = events.send(EngineEvent::InvalidMedia);
                        }
                    }
                }

                Ok(AudioCmd::Play) => {
                    // A drained or stopped sink has nothing left to play: start over.
                    if deck.sink.as_ref().is_none_or(|s| s.empty()) && !deck.rebuild_at(&stream, Duration::ZERO) {
                        continue;
                    }
                    if let Some(ref s) = deck.sink {
                        s.play();
                        deck.paused = false;
                    }
                }

                Ok(AudioCmd::Pause) => {
                    if let Some(ref s) = deck.sink {
                        s.pause();
                    }
                    deck.paused = true;
                }

                Ok(AudioCmd::Stop) => {
                    if let Some(ref s) = deck.sink {
                        s.stop();
                    }
                    deck.paused = true;
                    let _ = events.send(EngineEvent::PositionChanged(0));
                }

                Ok(AudioCmd::Seek(to)) => {
                    let seeked = match deck.sink {
                        Some(ref s) if !s.empty() => s.try_seek(to).is_ok(),
                        _ => false,
                    };
                    // Not every format can seek in place; rebuild and skip into the file instead.
                    if !seeked && !deck.rebuild_at(&stream, to) {
                        continue;
                    }
                    let _ = events.send(EngineEvent::PositionChanged(millis(to)));
                }

                Ok(AudioCmd::SetVolume(v)) => {
                    deck.volume = v.clamp(0.0, 1.0);
                    if let Some(ref s) = deck.sink {
                        s.set_volume(deck.volume);
                    }
                }

                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    if let Some(ref s) = deck.sink {
                        if !deck.paused && fade_out_ms > 0 {
                            fade_out_sink(s, deck.volume, fade_out_ms);
                        }
                        s.stop();
                    }
                    break;
                }

                Err(RecvTimeoutError::Timeout) => {
                    let Some(ref s) = deck.sink else {
                        continue;
                    };
                    if deck.paused {
                        continue;
                    }
                    if s.empty() {
                        // Report once; the controller decides whether to repeat or advance.
                        deck.paused = true;
                        let _ = events.send(EngineEvent::EndOfMedia);
                    } else {
                        let _ = events.send(EngineEvent::PositionChanged(millis(s.get_pos())));
                    }
                }

                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for v in fade_curve(from, steps) {
        sink.set_volume(v);
        thread::sleep(Duration::from_millis(step_ms));
    }
}

/// Without an output device every source is reported invalid so the UI
/// never believes something is playing.
fn run_silent(rx: Receiver<AudioCmd>, events: Sender<EngineEvent>) {
    for cmd in rx {
        match cmd {
            AudioCmd::Load(_) => {
                let _ = events.send(EngineEvent::InvalidMedia);
            }
            AudioCmd::Play => {
                let _ = events.send(EngineEvent::StateChanged(PlaybackState::Stopped));
            }
            AudioCmd::Quit { .. } => break,
            _ => {}
        }
    }
}
