use crate::{
    assets::source::MediaKind,
    assets::store::LoadedSources,
    foundation::core::{FRAME_RATE, Fps, FrameIndex},
    foundation::error::{ReelError, ReelResult},
    playlist::model::MediaConfig,
    timeline::audio::{self, AudioMode, MAX_LOOP_ENTRIES},
    timeline::frames::{FrameClock, to_frames},
    timeline::visual,
};

const OFFSET_EPSILON: f64 = 1e-9;

/// Source sub-range played by a video entry, in source seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TrimWindow {
    /// First source second played.
    pub start_secs: f64,
    /// Source second at which playback is cut.
    pub end_secs: f64,
}

/// One scheduled segment. Seconds are authoritative; frames are stamped once at construction.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimelineEntry {
    /// Media type.
    pub kind: MediaKind,
    /// Index into the per-kind source list (videos, images or tracks).
    pub source_index: usize,
    /// Start on the composition timeline.
    pub start_secs: f64,
    /// Length on the composition timeline.
    pub duration_secs: f64,
    /// Rendering layer.
    pub layer_index: usize,
    /// Trim window, videos only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim: Option<TrimWindow>,
    /// Playback gain, audio only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    /// `start_secs` in frames.
    pub start_frame: FrameIndex,
    /// `duration_secs` in frames.
    pub duration_frames: u64,
}

impl TimelineEntry {
    /// Video entry cut to `[0, duration_secs]` of its source.
    pub fn video(source_index: usize, start_secs: f64, duration_secs: f64) -> Self {
        Self::stamped(
            MediaKind::Video,
            source_index,
            start_secs,
            duration_secs,
            Some(TrimWindow {
                start_secs: 0.0,
                end_secs: duration_secs,
            }),
            None,
        )
    }

    /// Image entry shown for `duration_secs`.
    pub fn image(source_index: usize, start_secs: f64, duration_secs: f64) -> Self {
        Self::stamped(
            MediaKind::Image,
            source_index,
            start_secs,
            duration_secs,
            None,
            None,
        )
    }

    /// Audio entry played at a fixed gain.
    pub fn audio(
        source_index: usize,
        start_secs: f64,
        duration_secs: f64,
        layer_index: usize,
        volume: f64,
    ) -> Self {
        let mut entry = Self::stamped(
            MediaKind::Audio,
            source_index,
            start_secs,
            duration_secs,
            None,
            Some(volume),
        );
        entry.layer_index = layer_index;
        entry
    }

    fn stamped(
        kind: MediaKind,
        source_index: usize,
        start_secs: f64,
        duration_secs: f64,
        trim: Option<TrimWindow>,
        volume: Option<f64>,
    ) -> Self {
        Self {
            kind,
            source_index,
            start_secs,
            duration_secs,
            layer_index: 0,
            trim,
            volume,
            start_frame: FrameIndex(to_frames(start_secs)),
            duration_frames: to_frames(duration_secs),
        }
    }

    /// End on the composition timeline.
    pub fn end_secs(&self) -> f64 {
        self.start_secs + self.duration_secs
    }

    /// `true` for video and image entries.
    pub fn is_visual(&self) -> bool {
        matches!(self.kind, MediaKind::Video | MediaKind::Image)
    }
}

/// The compiled timeline: immutable, read-only for renderer, seek and position reporting.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Schedule {
    total_secs: f64,
    fps: Fps,
    total_frames: u64,
    video_count: usize,
    image_count: usize,
    audio_mode: AudioMode,
    visual_entries: Vec<TimelineEntry>,
    audio_entries: Vec<TimelineEntry>,
}

impl Schedule {
    /// Assemble a schedule from built entries and check every ordering invariant.
    pub fn new(
        visual_entries: Vec<TimelineEntry>,
        audio_entries: Vec<TimelineEntry>,
        audio_mode: AudioMode,
    ) -> ReelResult<Self> {
        let total_secs = visual_entries
            .iter()
            .fold(0.0, |acc, e| acc + e.duration_secs);
        let count = |kind| visual_entries.iter().filter(|e| e.kind == kind).count();
        let schedule = Self {
            total_secs,
            fps: FRAME_RATE,
            total_frames: to_frames(total_secs),
            video_count: count(MediaKind::Video),
            image_count: count(MediaKind::Image),
            audio_mode,
            visual_entries,
            audio_entries,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Total length in seconds; the sum of all visual durations.
    pub fn total_secs(&self) -> f64 {
        self.total_secs
    }

    /// Timeline frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Total length in frames, `round(total_secs * fps)`.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Visual entries in playlist order.
    pub fn visual_entries(&self) -> &[TimelineEntry] {
        &self.visual_entries
    }

    /// Audio entries in start order.
    pub fn audio_entries(&self) -> &[TimelineEntry] {
        &self.audio_entries
    }

    /// How the audio entries were laid out.
    pub fn audio_mode(&self) -> AudioMode {
        self.audio_mode
    }

    /// Number of video entries.
    pub fn video_count(&self) -> usize {
        self.video_count
    }

    /// Number of image entries.
    pub fn image_count(&self) -> usize {
        self.image_count
    }

    /// Layer holding every audio entry, above all visual layers.
    pub fn audio_layer_index(&self) -> usize {
        self.video_count + self.image_count
    }

    /// `true` when there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.visual_entries.is_empty()
    }

    /// Seconds/frame mapping against this schedule's totals.
    pub fn clock(&self) -> FrameClock {
        FrameClock::new(self.total_secs)
    }

    /// Check layout, layering and audio invariants.
    pub fn validate(&self) -> ReelResult<()> {
        let mut cursor = 0.0f64;
        for (i, e) in self.visual_entries.iter().enumerate() {
            if !e.is_visual() {
                return Err(ReelError::schedule(format!(
                    "visual entry {i} has kind {}",
                    e.kind
                )));
            }
            if !e.duration_secs.is_finite() || e.duration_secs <= 0.0 {
                return Err(ReelError::schedule(format!(
                    "visual entry {i} has non-positive duration"
                )));
            }
            if (e.start_secs - cursor).abs() > OFFSET_EPSILON {
                return Err(ReelError::schedule(format!(
                    "visual entry {i} starts at {}s, expected {cursor}s",
                    e.start_secs
                )));
            }
            cursor = e.end_secs();
        }

        let mut next_video = 0usize;
        let mut next_image = self.video_count;
        for (i, e) in self.visual_entries.iter().enumerate() {
            let expected = match e.kind {
                MediaKind::Video => &mut next_video,
                _ => &mut next_image,
            };
            if e.layer_index != *expected {
                return Err(ReelError::schedule(format!(
                    "visual entry {i} on layer {}, expected {}",
                    e.layer_index, *expected
                )));
            }
            *expected += 1;
        }

        for pair in self.audio_entries.windows(2) {
            if pair[1].start_secs <= pair[0].start_secs {
                return Err(ReelError::schedule(
                    "audio entry offsets must be strictly increasing",
                ));
            }
        }
        for e in &self.audio_entries {
            if e.kind != MediaKind::Audio || e.layer_index != self.audio_layer_index() {
                return Err(ReelError::schedule(format!(
                    "audio entry for track {} is not on the audio layer",
                    e.source_index
                )));
            }
        }

        match self.audio_mode {
            AudioMode::Sequential => {
                if let Some(first) = self.audio_entries.first()
                    && first.start_secs != 0.0
                {
                    return Err(ReelError::schedule(
                        "sequential audio must start at offset 0",
                    ));
                }
            }
            AudioMode::Loop => {
                if self.audio_entries.len() > MAX_LOOP_ENTRIES {
                    return Err(ReelError::schedule(format!(
                        "looped audio exceeds {MAX_LOOP_ENTRIES} entries"
                    )));
                }
                if self
                    .audio_entries
                    .iter()
                    .any(|e| e.start_secs >= self.total_secs)
                {
                    return Err(ReelError::schedule(
                        "looped audio entry starts at or past the end of the composition",
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Compile a playlist document and its loaded sources into a [`Schedule`].
#[tracing::instrument(skip_all, fields(config_id = config.id.as_deref().unwrap_or("")))]
pub fn build_schedule(config: &MediaConfig, sources: &LoadedSources) -> ReelResult<Schedule> {
    let items = config.playlist_items()?;
    let layout = visual::build_visual_layout(&items, &sources.videos, &sources.images)?;

    let audio_layer = layout.video_count + layout.image_count;
    let plan = audio::build_audio_schedule(
        &config.tracks,
        &sources.tracks,
        layout.total_secs,
        config.config.audio_loop_enabled,
        config.config.background_music_volume,
        audio_layer,
    )?;

    let schedule = Schedule::new(layout.entries, plan.entries, plan.mode)?;
    tracing::info!(
        total_secs = schedule.total_secs(),
        total_frames = schedule.total_frames(),
        visual = schedule.visual_entries().len(),
        audio = schedule.audio_entries().len(),
        "schedule built"
    );
    Ok(schedule)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/schedule.rs"]
mod tests;
