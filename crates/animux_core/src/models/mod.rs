//! Data model for merge requests.

mod enums;
mod request;

pub use enums::TrackType;
pub use request::{FontAttachment, MergeRequest, SubtitleSource, TrackSource};
