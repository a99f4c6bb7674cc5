//! Adapter implementations of the port traits.
//!
//! - `live`: real network and process access.
//! - `recording`: wraps another adapter and writes every interaction to a cassette.
//! - `replaying`: serves interactions back from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
