//! Persisted user session: preferences, flags and playlist contents.
//!
//! Loading never fails (any problem yields the default record) and saving is
//! best effort, so the player stays usable on a read-only or broken home.

mod record;
mod store;

pub use record::SessionRecord;
pub use store::SessionStore;
