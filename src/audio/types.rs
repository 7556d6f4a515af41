//! Messages exchanged with the audio thread.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug)]
pub(crate) enum AudioCmd {
    /// Open the file and keep it paused at the start.
    Load(PathBuf),
    Play,
    Pause,
    /// Stop and rewind; the source stays loaded.
    Stop,
    Seek(Duration),
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
