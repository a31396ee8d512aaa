use std::{collections::BTreeMap, path::Path};

use crate::foundation::error::{ReelError, ReelResult};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// The playlist document: what to show, in which order, and what to play underneath.
///
/// Unknown fields are ignored. A missing `playlist` or `tracks` reads as empty and a missing
/// `config` block reads as [`PlaybackConfig::default`].
pub struct MediaConfig {
    /// Optional document identifier, only used for logging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Ordered media ids defining play order. Ids may repeat.
    #[serde(default)]
    pub playlist: Vec<String>,
    /// Media table keyed by the ids used in `playlist`.
    #[serde(default)]
    pub media: BTreeMap<String, MediaItem>,
    /// Background audio tracks in play order.
    #[serde(default)]
    pub tracks: Vec<TrackConfig>,
    /// Playback options.
    #[serde(default)]
    pub config: PlaybackConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Kind of a visual playlist item.
pub enum VisualKind {
    /// Video clip, trimmed to its resolved duration.
    #[serde(rename = "video")]
    Video,
    /// Still image shown for an explicit or default duration.
    #[serde(rename = "img", alias = "image")]
    Image,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One entry of the media table.
///
/// The locator is read from the field named after the kind (`video` / `img`), falling back to a
/// generic `src`.
pub struct MediaItem {
    /// Item kind.
    #[serde(rename = "type")]
    pub kind: VisualKind,
    /// Locator for video items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    /// Locator for image items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    /// Kind-agnostic locator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Explicit on-screen duration in seconds (images only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl MediaItem {
    /// Source locator for this item, if one was given.
    pub fn locator(&self) -> Option<&str> {
        let specific = match self.kind {
            VisualKind::Video => self.video.as_deref(),
            VisualKind::Image => self.img.as_deref(),
        };
        specific
            .or(self.src.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One background audio track.
pub struct TrackConfig {
    /// Source locator.
    pub src: String,
    /// Declared nominal duration in seconds, used for loop-cycle arithmetic.
    #[serde(default)]
    pub duration: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Options from the document's `config` block.
pub struct PlaybackConfig {
    /// Fixed gain applied to every audio entry, in `[0, 1]`.
    #[serde(default = "default_background_music_volume")]
    pub background_music_volume: f64,
    /// Tile the tracks until the visual timeline is covered.
    #[serde(default)]
    pub audio_loop_enabled: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            background_music_volume: default_background_music_volume(),
            audio_loop_enabled: false,
        }
    }
}

fn default_background_music_volume() -> f64 {
    1.0
}

/// A playlist position resolved against the media table.
#[derive(Clone, Copy, Debug)]
pub struct PlaylistItem<'a> {
    /// Media id as listed in the playlist.
    pub id: &'a str,
    /// Referenced media entry.
    pub media: &'a MediaItem,
}

impl MediaConfig {
    /// Parse and validate a playlist document from JSON text.
    pub fn from_json_str(json: &str) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| ReelError::config(format!("parse playlist document: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a playlist document from disk.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ReelError::config(format!(
                "read playlist document '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&text)
    }

    /// Check references, locators, durations and volume.
    pub fn validate(&self) -> ReelResult<()> {
        for id in &self.playlist {
            let item = self.media.get(id).ok_or_else(|| {
                ReelError::validation(format!("playlist references unknown media id '{id}'"))
            })?;
            if item.locator().is_none() {
                return Err(ReelError::validation(format!(
                    "media '{id}' has no source locator"
                )));
            }
            if let Some(d) = item.duration
                && !d.is_finite()
            {
                return Err(ReelError::validation(format!(
                    "media '{id}' duration must be finite"
                )));
            }
        }

        for (i, track) in self.tracks.iter().enumerate() {
            if track.src.trim().is_empty() {
                return Err(ReelError::validation(format!(
                    "track {i} has an empty source locator"
                )));
            }
            if !track.duration.is_finite() || track.duration < 0.0 {
                return Err(ReelError::validation(format!(
                    "track {i} duration must be finite and >= 0"
                )));
            }
        }

        if self.config.audio_loop_enabled && !self.tracks.is_empty() {
            let cycle_secs = self.tracks.iter().fold(0.0, |acc, t| acc + t.duration);
            if cycle_secs <= 0.0 {
                return Err(ReelError::config(
                    "audio loop enabled but the track cycle has zero length",
                ));
            }
            if let Some(i) = self.tracks.iter().position(|t| t.duration <= 0.0) {
                return Err(ReelError::config(format!(
                    "audio loop enabled but track {i} declares a non-positive duration"
                )));
            }
        }

        let volume = self.config.background_music_volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(ReelError::validation(format!(
                "backgroundMusicVolume must be within [0, 1], got {volume}"
            )));
        }

        Ok(())
    }

    /// Playlist positions in play order, resolved against the media table.
    pub fn playlist_items(&self) -> ReelResult<Vec<PlaylistItem<'_>>> {
        self.playlist
            .iter()
            .map(|id| {
                self.media
                    .get(id)
                    .map(|media| PlaylistItem { id, media })
                    .ok_or_else(|| {
                        ReelError::validation(format!(
                            "playlist references unknown media id '{id}'"
                        ))
                    })
            })
            .collect()
    }

    /// Number of playlist positions of the given kind.
    pub fn count_of(&self, kind: VisualKind) -> usize {
        self.playlist
            .iter()
            .filter_map(|id| self.media.get(id))
            .filter(|m| m.kind == kind)
            .count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playlist/model.rs"]
mod tests;
