//! subconv core - subtitle formats, override tags and frame timing.
//!
//! This crate contains all conversion logic; the `subconv` binary is a thin
//! command-line layer over it.

pub mod config;
pub mod logging;
pub mod subtitles;
pub mod timestamps;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
