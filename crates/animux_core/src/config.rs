//! TOML-based configuration for the compiler's injected data.
//!
//! Everything the compiler consumes from the outside world - backend binary
//! paths, the fonts directory, display-name overrides - can be described in
//! a small TOML file instead of being hard-wired.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::langs::LanguageNames;
use crate::mux::BackendBinaries;

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration for the mux compiler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MuxConfig {
    /// Backend binary paths.
    #[serde(default)]
    pub binaries: BinarySettings,

    /// Directory holding the font files referenced by the font table.
    #[serde(default)]
    pub fonts_dir: Option<PathBuf>,

    /// Default for the simulcast naming suffix.
    #[serde(default)]
    pub simulcast: bool,

    /// Track display-name overrides, merged over the built-in dictionary.
    #[serde(default)]
    pub language_names: Option<LanguageNames>,
}

/// Backend binary path settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BinarySettings {
    /// Path to mkvmerge.
    #[serde(default)]
    pub mkvmerge: Option<PathBuf>,

    /// Path to ffmpeg.
    #[serde(default)]
    pub ffmpeg: Option<PathBuf>,
}

impl MuxConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Backend binaries descriptor for [`crate::mux::select_backends`].
    pub fn backend_binaries(&self) -> BackendBinaries {
        BackendBinaries {
            mkvmerge: self.binaries.mkvmerge.clone(),
            ffmpeg: self.binaries.ffmpeg.clone(),
        }
    }

    /// Effective display-name dictionary: built-in entries with config
    /// overrides applied on top.
    pub fn language_names(&self) -> LanguageNames {
        let mut names = LanguageNames::default();
        if let Some(overrides) = &self.language_names {
            names.merge(overrides);
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::langs::Iso639Table;

    #[test]
    fn parses_full_config() {
        let config = MuxConfig::from_toml_str(
            r#"
            fonts_dir = "/data/fonts"
            simulcast = true

            [binaries]
            mkvmerge = "/usr/bin/mkvmerge"
            ffmpeg = "/usr/bin/ffmpeg"

            [language_names]
            en = "English (US)"
            "#,
        )
        .unwrap();

        assert_eq!(config.fonts_dir, Some(PathBuf::from("/data/fonts")));
        assert!(config.simulcast);

        let binaries = config.backend_binaries();
        assert_eq!(binaries.mkvmerge, Some("/usr/bin/mkvmerge".into()));
        assert_eq!(binaries.ffmpeg, Some("/usr/bin/ffmpeg".into()));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = MuxConfig::from_toml_str("").unwrap();
        assert!(config.backend_binaries().mkvmerge.is_none());
        assert!(!config.simulcast);
        let names = config.language_names();
        let table = Iso639Table::default();
        assert_eq!(names.display_name("en", &table), "English (United State)");
    }

    #[test]
    fn name_overrides_merge_over_builtin() {
        let config = MuxConfig::from_toml_str(
            r#"
            [language_names]
            en = "English (US)"
            "#,
        )
        .unwrap();
        let names = config.language_names();
        let table = Iso639Table::default();
        assert_eq!(names.display_name("en", &table), "English (US)");
        // Untouched builtin entries survive the merge.
        assert_eq!(names.display_name("ja", &table), "日本語");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = MuxConfig::load(Path::new("/nonexistent/animux.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn load_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("animux.toml");
        std::fs::write(&path, "simulcast = true\n").unwrap();
        let config = MuxConfig::load(&path).unwrap();
        assert!(config.simulcast);
    }
}
