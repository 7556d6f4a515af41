//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive runtime
//! behavior and helpers to locate the config and session files on disk.

mod load;
mod schema;

pub use load::{config_home, resolve_config_path, resolve_session_path};
pub use schema::*;

#[cfg(test)]
pub(crate) mod tests;
