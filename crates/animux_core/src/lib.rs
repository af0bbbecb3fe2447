//! AniMux Core - track-multiplexing command compiler.
//!
//! Given a typed description of the video, audio, subtitle and font tracks
//! that make up one output container, this crate produces the exact argument
//! tokens for one of two remuxing backends (ffmpeg or mkvmerge). It never
//! spawns a backend itself; process management belongs to the caller.

pub mod config;
pub mod fonts;
pub mod langs;
pub mod logging;
pub mod models;
pub mod mux;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
