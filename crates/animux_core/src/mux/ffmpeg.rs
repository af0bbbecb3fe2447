//! ffmpeg command options builder.
//!
//! ffmpeg maps tracks by global stream index: every source becomes an `-i`
//! input, and `-map`/`-metadata` directives reference input slots. Metadata
//! directives are buffered while inputs are collected and emitted as one
//! contiguous block after the last input.
//!
//! Primary-video precedence for this backend: `video_and_audio` entries are
//! scanned before `video_only` entries; the first video-bearing entry wins
//! and later `video_only` entries are skipped entirely.

use crate::langs::{resolve_language_code, Iso639Table};
use crate::models::{MergeRequest, TrackSource, TrackType};

/// Stream title marker for the primary video track.
const VIDEO_STREAM_TITLE: &str = "title=[Video Stream]";

/// Subtitle language resolution falls back to English rather than the
/// caller's own tag (audio tracks do the opposite).
const SUBTITLE_LANG_FALLBACK: &str = "eng";

/// Builder for ffmpeg command-line options.
///
/// Generates a list of string tokens that form a complete ffmpeg command.
pub struct FfmpegOptionsBuilder<'a> {
    request: &'a MergeRequest,
    table: &'a Iso639Table,
}

impl<'a> FfmpegOptionsBuilder<'a> {
    /// Create a new options builder.
    pub fn new(request: &'a MergeRequest, table: &'a Iso639Table) -> Self {
        Self { request, table }
    }

    /// Build the complete ffmpeg command tokens.
    ///
    /// Deterministic for identical input: same request, same tokens.
    pub fn build(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut metadata = Vec::new();

        let mut input_index = 0usize;
        let mut audio_slot = 0usize;
        let mut has_video = false;

        for track in &self.request.video_and_audio {
            tokens.push("-i".to_string());
            tokens.push(track.path.to_string_lossy().to_string());

            if !has_video {
                metadata.push("-map".to_string());
                metadata.push(format!("{}:a", input_index));
                metadata.push("-map".to_string());
                metadata.push(format!("{}:v", input_index));
                self.push_audio_language(&mut metadata, audio_slot, track);
                metadata.push(format!("-metadata:s:v:{}", input_index));
                metadata.push(VIDEO_STREAM_TITLE.to_string());
                has_video = true;
            } else {
                metadata.push("-map".to_string());
                metadata.push(format!("{}:a", input_index));
                self.push_audio_language(&mut metadata, audio_slot, track);
            }
            audio_slot += 1;
            input_index += 1;
        }

        for track in &self.request.video_only {
            // Only the first candidate can still become primary video;
            // everything after it produces no arguments at all.
            if has_video {
                continue;
            }
            tokens.push("-i".to_string());
            tokens.push(track.path.to_string_lossy().to_string());
            metadata.push("-map".to_string());
            metadata.push(input_index.to_string());
            metadata.push("-map".to_string());
            metadata.push(format!("-{}:a", input_index));
            metadata.push(format!("-metadata:s:v:{}", input_index));
            metadata.push(VIDEO_STREAM_TITLE.to_string());
            has_video = true;
            input_index += 1;
        }

        for track in &self.request.audio_only {
            tokens.push("-i".to_string());
            tokens.push(track.path.to_string_lossy().to_string());
            metadata.push("-map".to_string());
            metadata.push(input_index.to_string());
            self.push_audio_language(&mut metadata, audio_slot, track);
            input_index += 1;
            audio_slot += 1;
        }

        for sub in &self.request.subtitles {
            tokens.push("-i".to_string());
            tokens.push(sub.file.to_string_lossy().to_string());
        }

        tokens.append(&mut metadata);

        for (sub_index, _) in self.request.subtitles.iter().enumerate() {
            tokens.push("-map".to_string());
            tokens.push((input_index + sub_index).to_string());
        }

        tokens.push("-c:v".to_string());
        tokens.push("copy".to_string());
        tokens.push("-c:a".to_string());
        tokens.push("copy".to_string());
        tokens.push("-c:s".to_string());
        tokens.push(if self.request.is_mp4_output() {
            "mov_text".to_string()
        } else {
            "ass".to_string()
        });

        for (sub_index, sub) in self.request.subtitles.iter().enumerate() {
            let language = if sub.literal_language {
                sub.language.clone()
            } else {
                resolve_language_code(self.table, &sub.language, SUBTITLE_LANG_FALLBACK)
            };
            let title = match &sub.title {
                Some(title) => title.clone(),
                None => language.clone(),
            };
            tokens.push(format!("-metadata:s:s:{}", sub_index));
            tokens.push(format!("title={}", title));
            tokens.push(format!("-metadata:s:s:{}", sub_index));
            tokens.push(format!("language={}", language));
        }

        tokens.push(self.request.output.to_string_lossy().to_string());

        tracing::debug!(
            "Compiled ffmpeg options: {} audio, {} subtitle sources",
            self.request.track_count(TrackType::Audio),
            self.request.track_count(TrackType::Subtitles),
        );

        tokens
    }

    /// Buffer the language metadata directive for one audio slot.
    fn push_audio_language(
        &self,
        metadata: &mut Vec<String>,
        audio_slot: usize,
        track: &TrackSource,
    ) {
        let language = if track.literal_language {
            track.language.clone()
        } else {
            resolve_language_code(self.table, &track.language, &track.language)
        };
        metadata.push(format!("-metadata:s:a:{}", audio_slot));
        metadata.push(format!("language={}", language));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SubtitleSource, TrackSource};

    fn build(request: &MergeRequest) -> Vec<String> {
        let table = Iso639Table::default();
        FfmpegOptionsBuilder::new(request, &table).build()
    }

    fn count(tokens: &[String], needle: &str) -> usize {
        tokens.iter().filter(|t| t.as_str() == needle).count()
    }

    #[test]
    fn muxed_plus_audio_only_maps_video_once() {
        let request = MergeRequest::new("out.mkv")
            .with_video_and_audio(vec![TrackSource::new("a.mkv", "en")])
            .with_audio_only(vec![TrackSource::new("b.aac", "ja")]);
        let tokens = build(&request);

        // Two audio language directives, one per audio slot.
        assert_eq!(count(&tokens, "-metadata:s:a:0"), 1);
        assert_eq!(count(&tokens, "-metadata:s:a:1"), 1);
        assert_eq!(count(&tokens, "language=eng"), 1);
        assert_eq!(count(&tokens, "language=jpn"), 1);

        // Exactly one video title directive, mapped from the muxed entry.
        assert_eq!(count(&tokens, VIDEO_STREAM_TITLE), 1);
        assert_eq!(count(&tokens, "-metadata:s:v:0"), 1);
        assert_eq!(count(&tokens, "0:v"), 1);
    }

    #[test]
    fn second_video_only_entry_emits_nothing() {
        let request = MergeRequest::new("out.mkv").with_video_only(vec![
            TrackSource::new("v1.mkv", "ja"),
            TrackSource::new("v2.mkv", "ja"),
        ]);
        let tokens = build(&request);

        assert_eq!(count(&tokens, "-i"), 1);
        assert!(tokens.contains(&"v1.mkv".to_string()));
        assert!(!tokens.contains(&"v2.mkv".to_string()));
        // The single video-only input maps itself while excluding audio.
        assert!(tokens.contains(&"-0:a".to_string()));
    }

    #[test]
    fn muxed_entry_wins_over_video_only() {
        let request = MergeRequest::new("out.mkv")
            .with_video_and_audio(vec![TrackSource::new("a.mkv", "en")])
            .with_video_only(vec![TrackSource::new("v.mkv", "ja")]);
        let tokens = build(&request);

        assert!(!tokens.contains(&"v.mkv".to_string()));
        assert_eq!(count(&tokens, VIDEO_STREAM_TITLE), 1);
    }

    #[test]
    fn subtitle_codec_follows_container() {
        let request = MergeRequest::new("out.mp4");
        let tokens = build(&request);
        assert!(tokens.contains(&"mov_text".to_string()));

        let request = MergeRequest::new("out.MKV");
        let tokens = build(&request);
        assert!(tokens.contains(&"ass".to_string()));
    }

    #[test]
    fn subtitles_map_after_track_inputs() {
        let request = MergeRequest::new("out.mkv")
            .with_video_and_audio(vec![TrackSource::new("a.mkv", "en")])
            .with_subtitles(vec![
                SubtitleSource::new("s1.ass", "es"),
                SubtitleSource::new("s2.ass", "pt"),
            ]);
        let tokens = build(&request);

        // One track input plus two subtitle inputs.
        assert_eq!(count(&tokens, "-i"), 3);
        // Subtitle maps use index arithmetic past the track inputs.
        let map_positions: Vec<_> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.as_str() == "-map")
            .map(|(i, _)| tokens[i + 1].clone())
            .collect();
        assert!(map_positions.contains(&"1".to_string()));
        assert!(map_positions.contains(&"2".to_string()));
    }

    #[test]
    fn subtitle_title_and_language_follow_resolution_rules() {
        let request = MergeRequest::new("out.mkv").with_subtitles(vec![
            SubtitleSource::new("s1.ass", "es"),
            SubtitleSource::new("s2.ass", "pt").with_title("Português (Brasil)"),
            SubtitleSource::new("s3.ass", "es-419").with_literal_language(),
        ]);
        let tokens = build(&request);

        // No override, resolved code doubles as the title.
        assert!(tokens.contains(&"title=spa".to_string()));
        assert!(tokens.contains(&"language=spa".to_string()));
        // Explicit title wins; language still resolved.
        assert!(tokens.contains(&"title=Português (Brasil)".to_string()));
        assert!(tokens.contains(&"language=por".to_string()));
        // Literal tag used verbatim for both.
        assert!(tokens.contains(&"title=es-419".to_string()));
        assert!(tokens.contains(&"language=es-419".to_string()));
    }

    #[test]
    fn unknown_subtitle_language_falls_back_to_english() {
        let request =
            MergeRequest::new("out.mkv").with_subtitles(vec![SubtitleSource::new("s.ass", "xx")]);
        let tokens = build(&request);
        assert!(tokens.contains(&"language=eng".to_string()));
    }

    #[test]
    fn skip_subtitle_mux_omits_subtitle_inputs() {
        let request = MergeRequest::new("out.mkv")
            .with_video_and_audio(vec![TrackSource::new("a.mkv", "en")])
            .with_subtitles(vec![SubtitleSource::new("s.ass", "es")])
            .with_skip_subtitle_mux();
        let tokens = build(&request);

        assert_eq!(count(&tokens, "-i"), 1);
        assert!(!tokens.iter().any(|t| t.starts_with("-metadata:s:s:")));
    }

    #[test]
    fn output_path_is_last_token() {
        let request = MergeRequest::new("out.mkv")
            .with_video_and_audio(vec![TrackSource::new("a.mkv", "en")]);
        let tokens = build(&request);
        assert_eq!(tokens.last().map(String::as_str), Some("out.mkv"));
    }

    #[test]
    fn literal_audio_language_is_verbatim() {
        let request = MergeRequest::new("out.mkv")
            .with_audio_only(vec![TrackSource::new("a.aac", "ja-JP").with_literal_language()]);
        let tokens = build(&request);
        assert!(tokens.contains(&"language=ja-JP".to_string()));
    }

    #[test]
    fn empty_request_still_produces_valid_tokens() {
        let request = MergeRequest::new("out.mkv");
        let tokens = build(&request);
        // Codec-copy block and output are always present.
        assert!(tokens.contains(&"-c:v".to_string()));
        assert!(tokens.contains(&"-c:a".to_string()));
        assert_eq!(tokens.last().map(String::as_str), Some("out.mkv"));
    }
}
