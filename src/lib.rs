//! reelsmith compiles a declarative playlist into a time-positioned presentation schedule.
//!
//! A playlist document lists video and still-image items in play order plus a set of background
//! audio tracks. reelsmith turns it into a [`Schedule`]: a gapless back-to-back layout of the
//! visual items, an audio schedule that either plays each track once or tiles the tracks to
//! cover the whole presentation, and a single seconds/frames mapping at a fixed 30 fps shared by
//! layout, playback reporting and seek.
//!
//! # Pipeline overview
//!
//! 1. **Read**: playlist JSON -> [`MediaConfig`]
//! 2. **Load**: every referenced source through a [`SourceLoader`], concurrently, index-preserving
//! 3. **Compile**: [`MediaConfig`] + [`LoadedSources`] -> [`Schedule`]
//! 4. **Mount**: [`Schedule`] -> [`LayerPlan`] -> a [`Compositor`]
//! 5. **Play / export**: [`PlaybackSession`] maps player frames back to seconds; an [`Exporter`]
//!    receives the schedule unmodified
//!
//! Decoding, compositing, encoding and UI live outside this crate behind the
//! [`SourceLoader`], [`Compositor`], [`Player`] and [`Exporter`] traits.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compile;
mod encode;
mod foundation;
mod pipeline;
mod playback;
mod playlist;
mod timeline;

pub use assets::media::{is_ffprobe_on_path, probe_duration, probe_image};
pub use assets::source::{
    MediaKind, ResolvedSource, SourceHandle, SourceLoader, SourceRequest, SourceRole,
};
pub use assets::store::{
    FsSourceLoader, LoadedSources, load_sources, normalize_rel_path, source_requests,
};
pub use compile::plan::{
    AudioClip, AudioLayer, Compositor, Layer, LayerPlan, RecordingCompositor, VisualLayer,
    compile_layers, mount_plan,
};
pub use encode::manifest::{ManifestExporter, ensure_parent_dir};
pub use encode::sink::{ExportProgress, Exporter, run_export};
pub use foundation::core::{FRAME_RATE, Fps, FrameIndex, FrameRange};
pub use foundation::error::{ReelError, ReelResult, SourceFailure};
pub use pipeline::{BuildStatus, Composed, compose, compose_from_path};
pub use playback::autoplay::{AutoplayFlow, AutoplayState};
pub use playback::mute::{AudioSurfaces, DEFAULT_MUTE_PROBES, MuteControl, MuteSurface};
pub use playback::session::{
    PlaybackController, PlaybackSession, Player, SKIP_SECS, format_time,
};
pub use playlist::dsl::{MediaConfigBuilder, image_item, video_item};
pub use playlist::model::{
    MediaConfig, MediaItem, PlaybackConfig, PlaylistItem, TrackConfig, VisualKind,
};
pub use timeline::audio::{AudioMode, AudioPlan, MAX_LOOP_ENTRIES, build_audio_schedule};
pub use timeline::duration::{
    AUDIO_FALLBACK_SECS, IMAGE_FALLBACK_SECS, VIDEO_FALLBACK_SECS, resolve_duration,
};
pub use timeline::frames::{FrameClock, to_frames, to_seconds};
pub use timeline::schedule::{Schedule, TimelineEntry, TrimWindow, build_schedule};
pub use timeline::visual::{VisualLayout, build_visual_layout};
