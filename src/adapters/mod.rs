//! Adapter implementations for port traits.
//!
//! - `live/` — Real API implementations
//! - `snapshot_file` — File-backed catalog source for offline runs

pub mod live;
pub mod snapshot_file;
