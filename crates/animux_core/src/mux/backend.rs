//! Backend selection: which remuxing tool can serve a target container.

use std::path::PathBuf;

/// Available backend binaries, as discovered by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendBinaries {
    /// Path to the mkvmerge binary, if available.
    pub mkvmerge: Option<PathBuf>,
    /// Path to the ffmpeg binary, if available.
    pub ffmpeg: Option<PathBuf>,
}

impl BackendBinaries {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mkvmerge binary path.
    pub fn with_mkvmerge(mut self, path: impl Into<PathBuf>) -> Self {
        self.mkvmerge = Some(path.into());
        self
    }

    /// Set the ffmpeg binary path.
    pub fn with_ffmpeg(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffmpeg = Some(path.into());
        self
    }
}

/// Backends chosen for one merge. Empty means no usable backend: the caller
/// should skip muxing for that output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedBackends {
    /// Primary mkvmerge binary (non-MP4 containers only).
    pub mkvmerge: Option<PathBuf>,
    /// ffmpeg binary: primary for MP4, secondary otherwise.
    pub ffmpeg: Option<PathBuf>,
}

impl SelectedBackends {
    /// Whether no backend was usable.
    pub fn is_empty(&self) -> bool {
        self.mkvmerge.is_none() && self.ffmpeg.is_none()
    }
}

/// Choose the backend(s) usable for the desired container.
///
/// MP4 output needs ffmpeg. Anything else prefers mkvmerge and carries
/// ffmpeg along as a secondary reference. When nothing is usable the
/// selection comes back empty and a warning is logged; missing binaries are
/// never fatal here.
pub fn select_backends(binaries: &BackendBinaries, wants_mp4: bool) -> SelectedBackends {
    if wants_mp4 {
        if let Some(ffmpeg) = &binaries.ffmpeg {
            return SelectedBackends {
                mkvmerge: None,
                ffmpeg: Some(ffmpeg.clone()),
            };
        }
        tracing::warn!("FFmpeg not found, skip muxing...");
    } else if binaries.mkvmerge.is_some() || binaries.ffmpeg.is_some() {
        return SelectedBackends {
            mkvmerge: binaries.mkvmerge.clone(),
            ffmpeg: binaries.ffmpeg.clone(),
        };
    } else {
        tracing::warn!("MKVmerge not found, skip muxing...");
    }
    SelectedBackends::default()
}
