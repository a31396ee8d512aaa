use std::{fmt, path::PathBuf};

use crate::{foundation::error::ReelResult, playlist::model::VisualKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Media type of a loaded source or a scheduled entry.
pub enum MediaKind {
    /// Video clip.
    Video,
    /// Still image.
    Image,
    /// Background audio.
    Audio,
}

impl From<VisualKind> for MediaKind {
    fn from(kind: VisualKind) -> Self {
        match kind {
            VisualKind::Video => Self::Video,
            VisualKind::Image => Self::Image,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Video => "video",
            Self::Image => "image",
            Self::Audio => "audio",
        })
    }
}

/// Input list a source request originates from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceRole {
    /// Video playlist items, indexed among videos only.
    Video,
    /// Image playlist items, indexed among images only.
    Image,
    /// Background tracks, indexed by track position.
    Track,
}

impl SourceRole {
    /// Media kind loaded for this role.
    pub fn kind(self) -> MediaKind {
        match self {
            Self::Video => MediaKind::Video,
            Self::Image => MediaKind::Image,
            Self::Track => MediaKind::Audio,
        }
    }
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Video => "video",
            Self::Image => "image",
            Self::Track => "track",
        })
    }
}

/// One source to load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceRequest {
    /// Originating list.
    pub role: SourceRole,
    /// Index within that list.
    pub index: usize,
    /// Locator as written in the playlist document.
    pub locator: String,
}

impl SourceRequest {
    /// Media kind the loader is expected to produce.
    pub fn kind(&self) -> MediaKind {
        self.role.kind()
    }
}

/// Opaque reference to loaded media, passed through to the rendering collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceHandle {
    /// Locator the source was requested with.
    pub locator: String,
    /// Resolved filesystem location, when the loader is filesystem-backed.
    pub path: Option<PathBuf>,
    /// Pixel dimensions, when known.
    pub dimensions: Option<(u32, u32)>,
}

/// A loaded source. The timeline compiler only reads `duration_secs`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSource {
    /// Media type.
    pub kind: MediaKind,
    /// Intrinsic duration in seconds, if the loader could determine one.
    pub duration_secs: Option<f64>,
    /// Loader-owned handle.
    pub handle: SourceHandle,
}

impl ResolvedSource {
    /// Source with a known (or unknown) intrinsic duration and a bare handle.
    pub fn new(kind: MediaKind, locator: impl Into<String>, duration_secs: Option<f64>) -> Self {
        Self {
            kind,
            duration_secs,
            handle: SourceHandle {
                locator: locator.into(),
                ..SourceHandle::default()
            },
        }
    }
}

/// Loader collaborator turning locators into [`ResolvedSource`] values.
///
/// Requests are independent and may be served concurrently from the rayon pool, so
/// implementations must be thread-safe.
pub trait SourceLoader: Send + Sync {
    /// Load a single source.
    fn load(&self, request: &SourceRequest) -> ReelResult<ResolvedSource>;
}
