//! Playlist module: the ordered list of tracks the player walks through.

mod model;

pub use model::Playlist;
