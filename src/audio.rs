//! Audio backend.
//!
//! Exposes the `AudioEngine` seam used by the playback core, and
//! `AudioPlayer`, the `rodio` implementation running on its own thread.

mod engine;
mod player;
mod sink;
mod thread;
mod types;

pub use engine::{AudioEngine, EngineEvent};
pub use player::AudioPlayer;
