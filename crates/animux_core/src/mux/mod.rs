//! Muxing command compilation for the two remuxing backends.
//!
//! # Architecture
//!
//! - **ffmpeg**: `FfmpegOptionsBuilder` - stream-index based mapping
//! - **mkvmerge**: `MkvmergeOptionsBuilder` - per-file flags before each
//!   input path
//! - **backend**: picks which backend(s) are usable for a target container
//!
//! Builders produce ordered token vectors; [`command_string`] flattens them
//! to a single string only at the boundary.

mod backend;
mod ffmpeg;
mod mkvmerge;

pub use backend::{select_backends, BackendBinaries, SelectedBackends};
pub use ffmpeg::FfmpegOptionsBuilder;
pub use mkvmerge::MkvmergeOptionsBuilder;

/// Flatten command tokens into one space-joined string.
///
/// Tokens containing whitespace are wrapped in double quotes; everything
/// else passes through untouched. Assertions in tests should target the
/// token vectors, not this string.
pub fn command_string(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|token| {
            if token.is_empty() || token.chars().any(char::is_whitespace) {
                format!("\"{}\"", token)
            } else {
                token.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
