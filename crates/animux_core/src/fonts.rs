//! Font attachment resolution.
//!
//! Subtitle scripts reference fonts by logical name; the font table maps
//! those names to backing files inside a fonts directory. Only files that
//! exist and are non-empty make it into the attachment list - a missing or
//! truncated font is dropped silently, never an error.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::FontAttachment;

/// The fonts one subtitle script requires, with its language label for the
/// summary log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleFontSet {
    /// Display label of the subtitle language (e.g. a locale string).
    pub language: String,
    /// Logical font names the script references.
    pub fonts: Vec<String>,
}

impl SubtitleFontSet {
    /// Create a new font set for a subtitle script.
    pub fn new(language: impl Into<String>, fonts: Vec<String>) -> Self {
        Self {
            language: language.into(),
            fonts,
        }
    }
}

/// Injected mapping from logical font name to backing file name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontTable {
    files: HashMap<String, String>,
}

impl FontTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a logical font name with its backing file name.
    pub fn insert(&mut self, name: impl Into<String>, file: impl Into<String>) {
        self.files.insert(name.into(), file.into());
    }

    /// Backing file name for a logical font name.
    pub fn file_name(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }
}

/// Resolve the fonts required by a set of subtitle scripts to attachments.
///
/// Required names are deduplicated preserving first appearance. Each name is
/// looked up in `table`, joined onto `fonts_dir`, and kept only if the file
/// exists with non-zero size. `mime` derives the MIME type from the backing
/// file name.
pub fn resolve_fonts(
    fonts_dir: &Path,
    subs: &[SubtitleFontSet],
    table: &FontTable,
    mime: impl Fn(&str) -> String,
) -> Vec<FontAttachment> {
    let mut required: Vec<&str> = Vec::new();
    let mut languages: Vec<&str> = Vec::new();
    for sub in subs {
        languages.push(&sub.language);
        for font in &sub.fonts {
            if !required.contains(&font.as_str()) {
                required.push(font);
            }
        }
    }

    if !languages.is_empty() {
        tracing::info!(
            "Subtitles: {} (Total: {})",
            languages.join(", "),
            languages.len()
        );
    }
    if !required.is_empty() {
        tracing::info!(
            "Required fonts: {} (Total: {})",
            required.join(", "),
            required.len()
        );
    }

    let mut attachments = Vec::new();
    for name in required {
        let Some(file_name) = table.file_name(name) else {
            continue;
        };
        let font_path = fonts_dir.join(file_name);
        let non_empty = std::fs::metadata(&font_path)
            .map(|m| m.len() != 0)
            .unwrap_or(false);
        if non_empty {
            attachments.push(FontAttachment {
                name: file_name.to_string(),
                path: font_path,
                mime: mime(file_name),
            });
        }
    }
    attachments
}
