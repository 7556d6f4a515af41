//! Utilities for creating `rodio` sinks from file paths.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, Sink, Source};

#[derive(Debug, thiserror::Error)]
pub(crate) enum SinkError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode { path: PathBuf, source: DecoderError },
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
///
/// Also returns the duration reported by the decoder, when it knows one.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
    volume: f32,
) -> Result<(Sink, Option<Duration>), SinkError> {
    let file = File::open(path).map_err(|source| SinkError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| SinkError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let total = decoder.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    sink.set_volume(volume);
    sink.pause();
    Ok((sink, total))
}

/// Read the track length from the file's tags/properties.
pub(crate) fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}

/// Volumes for a linear fade from `from` down to silence in `steps` steps.
pub(crate) fn fade_curve(from: f32, steps: u64) -> Vec<f32> {
    let steps = steps.max(1);
    (1..=steps)
        .map(|step| from * (1.0 - step as f32 / steps as f32))
        .collect()
}
