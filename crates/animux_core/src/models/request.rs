//! Merge request types: the ordered track plan for one output container.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::enums::TrackType;

/// A single muxed or elementary track source (video+audio, video-only or
/// audio-only, depending on which request list it sits in).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSource {
    /// Path to the source file.
    pub path: PathBuf,
    /// Language tag: a 2-letter ISO code, or an opaque tag when
    /// `literal_language` is set.
    pub language: String,
    /// When true, `language` is emitted verbatim instead of being resolved
    /// through the ISO-639 table.
    #[serde(default)]
    pub literal_language: bool,
}

impl TrackSource {
    /// Create a new track source.
    pub fn new(path: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            language: language.into(),
            literal_language: false,
        }
    }

    /// Use the language tag verbatim, skipping ISO-639 resolution.
    pub fn with_literal_language(mut self) -> Self {
        self.literal_language = true;
        self
    }
}

/// A subtitle file to mux in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleSource {
    /// Path to the subtitle file.
    pub file: PathBuf,
    /// Language tag (see [`TrackSource::language`]).
    pub language: String,
    /// Explicit display title override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// When true, `language` is emitted verbatim.
    #[serde(default)]
    pub literal_language: bool,
}

impl SubtitleSource {
    /// Create a new subtitle source.
    pub fn new(file: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            language: language.into(),
            title: None,
            literal_language: false,
        }
    }

    /// Set an explicit display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Use the language tag verbatim, skipping ISO-639 resolution.
    pub fn with_literal_language(mut self) -> Self {
        self.literal_language = true;
        self
    }
}

/// A resolved font attachment (name, on-disk path, MIME type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontAttachment {
    /// Attachment file name as stored in the container.
    pub name: String,
    /// Resolved path on disk.
    pub path: PathBuf,
    /// MIME type for the attachment.
    pub mime: String,
}

/// Ordered track plan for one output file.
///
/// Track order within each list is significant: it fixes backend stream and
/// file index assignment, and the first video-bearing entry encountered
/// becomes the single primary video track.
///
/// A request is built once per output file and consumed by exactly one
/// options builder. `clean_up` transfers source-file lifetime ownership to
/// the request for the deletion step only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Sources carrying both a video and an audio stream.
    #[serde(default)]
    pub video_and_audio: Vec<TrackSource>,
    /// Video-only sources. Only the first can become primary video.
    #[serde(default)]
    pub video_only: Vec<TrackSource>,
    /// Audio-only sources.
    #[serde(default)]
    pub audio_only: Vec<TrackSource>,
    /// Subtitle files. Forced empty when subtitle muxing is skipped.
    #[serde(default)]
    pub subtitles: Vec<SubtitleSource>,
    /// Destination path; the extension decides the container.
    pub output: PathBuf,
    /// Simulcast release: switches the track-name suffix.
    #[serde(default)]
    pub simulcast: bool,
    /// Resolved font attachments (mkvmerge only).
    #[serde(default)]
    pub fonts: Vec<FontAttachment>,
    /// When set, subtitles are dropped at construction time and stay empty.
    #[serde(default)]
    skip_subtitle_mux: bool,
}

impl MergeRequest {
    /// Create an empty request for the given output path.
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            video_and_audio: Vec::new(),
            video_only: Vec::new(),
            audio_only: Vec::new(),
            subtitles: Vec::new(),
            output: output.into(),
            simulcast: false,
            fonts: Vec::new(),
            skip_subtitle_mux: false,
        }
    }

    /// Set the video+audio source list.
    pub fn with_video_and_audio(mut self, tracks: Vec<TrackSource>) -> Self {
        self.video_and_audio = tracks;
        self
    }

    /// Set the video-only source list.
    pub fn with_video_only(mut self, tracks: Vec<TrackSource>) -> Self {
        self.video_only = tracks;
        self
    }

    /// Set the audio-only source list.
    pub fn with_audio_only(mut self, tracks: Vec<TrackSource>) -> Self {
        self.audio_only = tracks;
        self
    }

    /// Set the subtitle list. Ignored if subtitle muxing was skipped.
    pub fn with_subtitles(mut self, subtitles: Vec<SubtitleSource>) -> Self {
        if !self.skip_subtitle_mux {
            self.subtitles = subtitles;
        }
        self
    }

    /// Mark this request as a simulcast release.
    pub fn with_simulcast(mut self, simulcast: bool) -> Self {
        self.simulcast = simulcast;
        self
    }

    /// Set the resolved font attachments.
    pub fn with_fonts(mut self, fonts: Vec<FontAttachment>) -> Self {
        self.fonts = fonts;
        self
    }

    /// Skip subtitle muxing entirely. Any subtitles already set are dropped
    /// and later `with_subtitles` calls become no-ops.
    pub fn with_skip_subtitle_mux(mut self) -> Self {
        self.skip_subtitle_mux = true;
        self.subtitles.clear();
        self
    }

    /// Whether the output extension selects an MP4 container.
    pub fn is_mp4_output(&self) -> bool {
        self.output
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("mp4"))
            .unwrap_or(false)
    }

    /// Number of sources contributing tracks of the given type.
    pub fn track_count(&self, track_type: TrackType) -> usize {
        match track_type {
            // At most one primary video across both lists.
            TrackType::Video => {
                if self.video_and_audio.is_empty() && self.video_only.is_empty() {
                    0
                } else {
                    1
                }
            }
            TrackType::Audio => self.video_and_audio.len() + self.audio_only.len(),
            TrackType::Subtitles => self.subtitles.len(),
        }
    }

    /// All source paths the request references (tracks and subtitles, not
    /// fonts, not the output).
    pub fn source_paths(&self) -> impl Iterator<Item = &Path> {
        self.video_and_audio
            .iter()
            .chain(&self.video_only)
            .chain(&self.audio_only)
            .map(|t| t.path.as_path())
            .chain(self.subtitles.iter().map(|s| s.file.as_path()))
    }

    /// Delete every consumed source file (tracks and subtitles).
    ///
    /// Must only run after the caller has confirmed the backend completed
    /// successfully: deletion is unconditional and non-transactional. The
    /// first failure propagates; there is no partial-cleanup recovery.
    pub fn clean_up(&self) -> io::Result<()> {
        for path in self.source_paths() {
            fs::remove_file(path)?;
            tracing::debug!("Removed consumed source {}", path.display());
        }
        Ok(())
    }
}
