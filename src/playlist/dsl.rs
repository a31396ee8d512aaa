use std::collections::BTreeMap;

use crate::{
    foundation::error::{ReelError, ReelResult},
    playlist::model::{MediaConfig, MediaItem, PlaybackConfig, TrackConfig, VisualKind},
};

/// Fluent builder for [`MediaConfig`].
///
/// Declaring a video or image appends it to the playlist; [`MediaConfigBuilder::play`] appends
/// an already declared id again.
#[derive(Debug, Default)]
pub struct MediaConfigBuilder {
    id: Option<String>,
    playlist: Vec<String>,
    media: BTreeMap<String, MediaItem>,
    tracks: Vec<TrackConfig>,
    config: PlaybackConfig,
}

impl MediaConfigBuilder {
    /// Start an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document identifier.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Declare a media entry and append it to the playlist.
    pub fn media(mut self, id: impl Into<String>, item: MediaItem) -> ReelResult<Self> {
        let id = id.into();
        if self.media.contains_key(&id) {
            return Err(ReelError::validation(format!("duplicate media id '{id}'")));
        }
        self.media.insert(id.clone(), item);
        self.playlist.push(id);
        Ok(self)
    }

    /// Declare a video and append it to the playlist.
    pub fn video(self, id: impl Into<String>, source: impl Into<String>) -> ReelResult<Self> {
        self.media(id, video_item(source))
    }

    /// Declare an image and append it to the playlist.
    pub fn image(
        self,
        id: impl Into<String>,
        source: impl Into<String>,
        duration: Option<f64>,
    ) -> ReelResult<Self> {
        self.media(id, image_item(source, duration))
    }

    /// Append an already declared id to the playlist.
    pub fn play(mut self, id: impl Into<String>) -> ReelResult<Self> {
        let id = id.into();
        if !self.media.contains_key(&id) {
            return Err(ReelError::validation(format!("unknown media id '{id}'")));
        }
        self.playlist.push(id);
        Ok(self)
    }

    /// Append a background track with its declared duration.
    pub fn track(mut self, source: impl Into<String>, duration: f64) -> Self {
        self.tracks.push(TrackConfig {
            src: source.into(),
            duration,
        });
        self
    }

    /// Set the background music volume.
    pub fn volume(mut self, volume: f64) -> Self {
        self.config.background_music_volume = volume;
        self
    }

    /// Enable or disable loop-filling of the audio tracks.
    pub fn audio_loop(mut self, enabled: bool) -> Self {
        self.config.audio_loop_enabled = enabled;
        self
    }

    /// Finish and validate the document.
    pub fn build(self) -> ReelResult<MediaConfig> {
        let cfg = MediaConfig {
            id: self.id,
            playlist: self.playlist,
            media: self.media,
            tracks: self.tracks,
            config: self.config,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

/// A video media entry reading from `source`.
pub fn video_item(source: impl Into<String>) -> MediaItem {
    MediaItem {
        kind: VisualKind::Video,
        video: Some(source.into()),
        img: None,
        src: None,
        duration: None,
    }
}

/// An image media entry reading from `source`, optionally with an explicit duration.
pub fn image_item(source: impl Into<String>, duration: Option<f64>) -> MediaItem {
    MediaItem {
        kind: VisualKind::Image,
        video: None,
        img: Some(source.into()),
        src: None,
        duration,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playlist/dsl.rs"]
mod tests;
