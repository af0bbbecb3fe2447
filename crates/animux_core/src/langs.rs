//! Language code resolution and track display names.
//!
//! The ISO-639 table is injected data: the built-in `Default` table covers
//! the codes seen in practice, and callers can substitute a synthetic table
//! (e.g. deserialized from JSON) for testing or to extend coverage.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The Mandarin tag has no usable 2-letter entry in ISO-639 tables; it is
/// pinned to the 3-letter code for Chinese.
const MANDARIN_TAG: &str = "cmn";
const CHINESE_CODE3: &str = "chi";

/// One ISO-639 table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Iso639Entry {
    /// English language name.
    pub name: String,
    /// ISO 639-1 2-letter code, when the language has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part1: Option<String>,
    /// ISO 639-2 3-letter code.
    pub part2: String,
}

impl Iso639Entry {
    fn new(name: &str, part1: &str, part2: &str) -> Self {
        Self {
            name: name.to_string(),
            part1: Some(part1.to_string()),
            part2: part2.to_string(),
        }
    }
}

/// An ISO-639 lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iso639Table {
    entries: Vec<Iso639Entry>,
}

impl Iso639Table {
    /// Create a table from explicit entries.
    pub fn new(entries: Vec<Iso639Entry>) -> Self {
        Self { entries }
    }

    /// The table entries, in scan order.
    pub fn entries(&self) -> &[Iso639Entry] {
        &self.entries
    }
}

impl Default for Iso639Table {
    /// Compact built-in table covering the commonly muxed languages.
    fn default() -> Self {
        Self::new(vec![
            Iso639Entry::new("English", "en", "eng"),
            Iso639Entry::new("Spanish", "es", "spa"),
            Iso639Entry::new("Portuguese", "pt", "por"),
            Iso639Entry::new("Japanese", "ja", "jpn"),
            Iso639Entry::new("Chinese", "zh", "chi"),
            Iso639Entry::new("French", "fr", "fre"),
            Iso639Entry::new("German", "de", "ger"),
            Iso639Entry::new("Italian", "it", "ita"),
            Iso639Entry::new("Russian", "ru", "rus"),
            Iso639Entry::new("Arabic", "ar", "ara"),
            Iso639Entry::new("Korean", "ko", "kor"),
            Iso639Entry::new("Hindi", "hi", "hin"),
            Iso639Entry::new("Turkish", "tr", "tur"),
            Iso639Entry::new("Polish", "pl", "pol"),
            Iso639Entry::new("Dutch", "nl", "dut"),
            Iso639Entry::new("Swedish", "sv", "swe"),
            Iso639Entry::new("Thai", "th", "tha"),
            Iso639Entry::new("Vietnamese", "vi", "vie"),
            Iso639Entry::new("Indonesian", "id", "ind"),
            Iso639Entry::new("Malay", "ms", "may"),
        ])
    }
}

/// Resolve a 2-letter language code to its 3-letter form.
///
/// The Mandarin tag always resolves to the fixed Chinese code. A code with
/// no table entry degrades to `fallback` unchanged, so callers passing the
/// original code end up using it verbatim rather than failing.
pub fn resolve_language_code(table: &Iso639Table, code: &str, fallback: &str) -> String {
    if code == MANDARIN_TAG {
        return CHINESE_CODE3.to_string();
    }
    for entry in table.entries() {
        if entry.part1.as_deref() == Some(code) {
            return entry.part2.clone();
        }
    }
    fallback.to_string()
}

/// Human-readable display names for track naming, keyed by language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageNames {
    names: HashMap<String, String>,
}

impl LanguageNames {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// Insert or override a display name.
    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.names.insert(code.into(), name.into());
    }

    /// Merge overrides on top of this dictionary.
    pub fn merge(&mut self, overrides: &LanguageNames) {
        for (code, name) in &overrides.names {
            self.names.insert(code.clone(), name.clone());
        }
    }

    /// Display name for a language tag.
    ///
    /// Tags without a dictionary entry fall back to the resolved 3-letter
    /// code, so every track gets a stable non-empty name.
    pub fn display_name(&self, code: &str, table: &Iso639Table) -> String {
        match self.names.get(code) {
            Some(name) => name.clone(),
            None => resolve_language_code(table, code, code),
        }
    }
}

impl Default for LanguageNames {
    /// The release-naming dictionary used for merged track titles.
    fn default() -> Self {
        let mut names = Self::new();
        names.insert("en", "English (United State)");
        names.insert("es", "Español (Latinoamericano)");
        names.insert("pt", "Português (Brasil)");
        names.insert("ja", "日本語");
        names.insert("cmn", "官話");
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_codes_present_in_table() {
        let table = Iso639Table::default();
        assert_eq!(resolve_language_code(&table, "en", "en"), "eng");
        assert_eq!(resolve_language_code(&table, "ja", "ja"), "jpn");
        assert_eq!(resolve_language_code(&table, "es", "es"), "spa");
    }

    #[test]
    fn mandarin_tag_ignores_table_contents() {
        let empty = Iso639Table::new(vec![]);
        assert_eq!(resolve_language_code(&empty, "cmn", "xx"), "chi");

        // Even a table that maps cmn elsewhere is bypassed.
        let odd = Iso639Table::new(vec![Iso639Entry::new("Mandarin", "cmn", "zzz")]);
        assert_eq!(resolve_language_code(&odd, "cmn", "xx"), "chi");
    }

    #[test]
    fn unknown_code_returns_fallback_unchanged() {
        let table = Iso639Table::default();
        assert_eq!(resolve_language_code(&table, "xx", "xx"), "xx");
        assert_eq!(resolve_language_code(&table, "qq", "eng"), "eng");
    }

    #[test]
    fn synthetic_table_is_honored() {
        let table = Iso639Table::new(vec![Iso639Entry::new("Elvish", "qy", "qya")]);
        assert_eq!(resolve_language_code(&table, "qy", "qy"), "qya");
        assert_eq!(resolve_language_code(&table, "en", "en"), "en");
    }

    #[test]
    fn entry_without_part1_is_skipped() {
        let table = Iso639Table::new(vec![Iso639Entry {
            name: "Undetermined".to_string(),
            part1: None,
            part2: "und".to_string(),
        }]);
        assert_eq!(resolve_language_code(&table, "en", "en"), "en");
    }

    #[test]
    fn display_name_uses_dictionary() {
        let names = LanguageNames::default();
        let table = Iso639Table::default();
        assert_eq!(names.display_name("en", &table), "English (United State)");
        assert_eq!(names.display_name("ja", &table), "日本語");
        assert_eq!(names.display_name("cmn", &table), "官話");
    }

    #[test]
    fn display_name_falls_back_to_resolved_code() {
        let names = LanguageNames::default();
        let table = Iso639Table::default();
        assert_eq!(names.display_name("fr", &table), "fre");
        // Not in the table either: the tag itself comes back.
        assert_eq!(names.display_name("xx", &table), "xx");
    }

    #[test]
    fn table_deserializes_from_json() {
        let json = r#"[{"name":"English","part1":"en","part2":"eng"}]"#;
        let table: Iso639Table = serde_json::from_str(json).unwrap();
        assert_eq!(resolve_language_code(&table, "en", "en"), "eng");
    }
}
