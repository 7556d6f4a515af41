//! Application module: the composition root tying playlist, playback and
//! session persistence together.
//!
//! The `App` model lives in `app::model`; user intents are `app::Command`s.

mod command;
mod model;

pub use command::Command;
pub use model::*;
