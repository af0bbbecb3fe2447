//! mkvmerge command options builder.
//!
//! mkvmerge works per file: track-selection and naming flags precede each
//! input path and apply only to it. Output and global flags come first, then
//! the video block, audio-only blocks, subtitle blocks and attachments, in
//! that fixed order.
//!
//! Primary-video precedence for this backend: `video_only` entries are
//! scanned before `video_and_audio` entries; once a primary video is found,
//! remaining `video_and_audio` entries contribute audio only and remaining
//! `video_only` entries are skipped.

use crate::langs::{resolve_language_code, Iso639Table, LanguageNames};
use crate::models::{MergeRequest, SubtitleSource, TrackSource, TrackType};

/// Subtitle language resolution falls back to English (see the ffmpeg
/// builder for the audio-track counterpart, which falls back to the tag).
const SUBTITLE_LANG_FALLBACK: &str = "eng";

/// Builder for mkvmerge command-line options.
///
/// Generates a list of string tokens that form a complete mkvmerge command.
pub struct MkvmergeOptionsBuilder<'a> {
    request: &'a MergeRequest,
    table: &'a Iso639Table,
    names: &'a LanguageNames,
}

impl<'a> MkvmergeOptionsBuilder<'a> {
    /// Create a new options builder.
    pub fn new(
        request: &'a MergeRequest,
        table: &'a Iso639Table,
        names: &'a LanguageNames,
    ) -> Self {
        Self {
            request,
            table,
            names,
        }
    }

    /// Build the complete mkvmerge command tokens.
    pub fn build(&self) -> Vec<String> {
        let mut tokens = Vec::new();

        // Output first, then globals pinning reproducible output.
        tokens.push("-o".to_string());
        tokens.push(self.request.output.to_string_lossy().to_string());
        tokens.push("--no-date".to_string());
        tokens.push("--disable-track-statistics-tags".to_string());
        tokens.push("--engage".to_string());
        tokens.push("no_variable_data".to_string());

        let mut has_video = false;

        for track in &self.request.video_only {
            if has_video {
                continue;
            }
            tokens.push("--video-tracks".to_string());
            tokens.push("0".to_string());
            tokens.push("--no-audio".to_string());
            tokens.push("--track-name".to_string());
            tokens.push(format!("0:{}", self.track_name(track)));
            tokens.push("--language".to_string());
            tokens.push(format!("0:{}", self.audio_language(track)));
            has_video = true;
            tokens.push(track.path.to_string_lossy().to_string());
        }

        for track in &self.request.video_and_audio {
            let name = self.track_name(track);
            if !has_video {
                tokens.push("--video-tracks".to_string());
                tokens.push("0".to_string());
                tokens.push("--audio-tracks".to_string());
                tokens.push("1".to_string());
                tokens.push("--track-name".to_string());
                tokens.push(format!("0:{}", name));
                tokens.push("--track-name".to_string());
                tokens.push(format!("1:{}", name));
                tokens.push("--language".to_string());
                tokens.push(format!("1:{}", self.audio_language(track)));
                has_video = true;
            } else {
                tokens.push("--no-video".to_string());
                tokens.push("--audio-tracks".to_string());
                tokens.push("1".to_string());
                tokens.push("--track-name".to_string());
                tokens.push(format!("1:{}", name));
                tokens.push("--language".to_string());
                tokens.push(format!("1:{}", self.audio_language(track)));
            }
            tokens.push(track.path.to_string_lossy().to_string());
        }

        for track in &self.request.audio_only {
            tokens.push("--track-name".to_string());
            tokens.push(format!("0:{}", self.track_name(track)));
            tokens.push("--language".to_string());
            tokens.push(format!("0:{}", self.audio_language(track)));
            tokens.push("--no-video".to_string());
            tokens.push("--audio-tracks".to_string());
            tokens.push("0".to_string());
            tokens.push(track.path.to_string_lossy().to_string());
        }

        if self.request.subtitles.is_empty() {
            tokens.push("--no-subtitles".to_string());
        } else {
            for sub in &self.request.subtitles {
                let language = self.subtitle_language(sub);
                let title = match &sub.title {
                    Some(title) => title.clone(),
                    None => language.clone(),
                };
                tokens.push("--track-name".to_string());
                tokens.push(format!("0:{}", title));
                tokens.push("--language".to_string());
                tokens.push(format!("0:{}", language));
                tokens.push(sub.file.to_string_lossy().to_string());
            }
        }

        if self.request.fonts.is_empty() {
            tokens.push("--no-attachments".to_string());
        } else {
            for font in &self.request.fonts {
                tokens.push("--attachment-name".to_string());
                tokens.push(font.name.clone());
                tokens.push("--attachment-mime-type".to_string());
                tokens.push(font.mime.clone());
                tokens.push("--attach-file".to_string());
                tokens.push(font.path.to_string_lossy().to_string());
            }
        }

        tracing::debug!(
            "Compiled mkvmerge options: {} audio sources, {} subtitles, {} attachments",
            self.request.track_count(TrackType::Audio),
            self.request.track_count(TrackType::Subtitles),
            self.request.fonts.len(),
        );

        tokens
    }

    /// Display name for a track: the literal tag, or the language dictionary
    /// entry (falling back to the resolved 3-letter code), plus the release
    /// suffix.
    fn track_name(&self, track: &TrackSource) -> String {
        let base = if track.literal_language {
            track.language.clone()
        } else {
            self.names.display_name(&track.language, self.table)
        };
        let suffix = if self.request.simulcast {
            "[Simulcast]"
        } else {
            "[Uncut]"
        };
        format!("{} {}", base, suffix)
    }

    /// Language tag for a video/audio track, resolved unless literal.
    fn audio_language(&self, track: &TrackSource) -> String {
        if track.literal_language {
            track.language.clone()
        } else {
            resolve_language_code(self.table, &track.language, &track.language)
        }
    }

    /// Language tag for a subtitle track, resolved with the English fallback
    /// unless literal.
    fn subtitle_language(&self, sub: &SubtitleSource) -> String {
        if sub.literal_language {
            sub.language.clone()
        } else {
            resolve_language_code(self.table, &sub.language, SUBTITLE_LANG_FALLBACK)
        }
    }
}
