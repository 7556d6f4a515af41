//! Playback control: transport state machine and next/previous policy.

mod controller;

pub use controller::*;

#[cfg(test)]
pub(crate) mod tests;
