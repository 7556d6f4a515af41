//! Track model and the filesystem helpers used to feed the playlist.

mod model;
mod scan;

pub use model::Track;
pub use scan::{audio_files_in, is_audio_file};
