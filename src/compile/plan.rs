use crate::{
    assets::source::MediaKind,
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::ReelResult,
    timeline::frames::to_frames,
    timeline::schedule::Schedule,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One visual entry on its own layer.
pub struct VisualLayer {
    /// Stacking index.
    pub index: usize,
    /// Video or image.
    pub kind: MediaKind,
    /// Index into the per-kind source list.
    pub source_index: usize,
    /// Source frames to play, videos only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim: Option<FrameRange>,
    /// Timeline frame the entry starts on.
    pub delay_frames: u64,
    /// Length in frames.
    pub duration_frames: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One audio entry inside the audio layer.
pub struct AudioClip {
    /// Track index.
    pub source_index: usize,
    /// Timeline frame the clip starts on.
    pub delay_frames: u64,
    /// Scheduled length in frames.
    pub duration_frames: u64,
    /// Fixed gain.
    pub volume: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// The single layer carrying every audio entry.
pub struct AudioLayer {
    /// Stacking index, above every visual layer.
    pub index: usize,
    /// Clips in start order.
    pub clips: Vec<AudioClip>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
/// A layer creation request for the compositor.
pub enum Layer {
    /// Video or image layer.
    Visual(VisualLayer),
    /// Audio layer.
    Audio(AudioLayer),
}

impl Layer {
    /// Stacking index of the layer.
    pub fn index(&self) -> usize {
        match self {
            Self::Visual(l) => l.index,
            Self::Audio(l) => l.index,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything the compositor needs to mount a schedule.
pub struct LayerPlan {
    /// Timeline frame rate.
    pub fps: Fps,
    /// Composition length in frames.
    pub total_frames: u64,
    /// Layers in ascending index order; the audio layer is last.
    pub layers: Vec<Layer>,
}

/// Translate a schedule into compositor layer requests.
pub fn compile_layers(schedule: &Schedule) -> LayerPlan {
    let mut visual: Vec<VisualLayer> = schedule
        .visual_entries()
        .iter()
        .map(|e| VisualLayer {
            index: e.layer_index,
            kind: e.kind,
            source_index: e.source_index,
            trim: e.trim.map(|t| FrameRange {
                start: FrameIndex(to_frames(t.start_secs)),
                end: FrameIndex(to_frames(t.end_secs)),
            }),
            delay_frames: e.start_frame.0,
            duration_frames: e.duration_frames,
        })
        .collect();
    visual.sort_by_key(|l| l.index);

    let audio = AudioLayer {
        index: schedule.audio_layer_index(),
        clips: schedule
            .audio_entries()
            .iter()
            .map(|e| AudioClip {
                source_index: e.source_index,
                delay_frames: e.start_frame.0,
                duration_frames: e.duration_frames,
                volume: e.volume.unwrap_or(1.0),
            })
            .collect(),
    };

    let mut layers: Vec<Layer> = visual.into_iter().map(Layer::Visual).collect();
    layers.push(Layer::Audio(audio));

    LayerPlan {
        fps: schedule.fps(),
        total_frames: schedule.total_frames(),
        layers,
    }
}

/// Rendering collaborator receiving a compiled plan.
pub trait Compositor {
    /// Set the composition length.
    fn set_duration_frames(&mut self, frames: u64) -> ReelResult<()>;
    /// Create one layer.
    fn create_layer(&mut self, layer: &Layer) -> ReelResult<()>;
}

/// Mount a compiled plan: duration first, then every layer in index order.
pub fn mount_plan(plan: &LayerPlan, compositor: &mut dyn Compositor) -> ReelResult<()> {
    compositor.set_duration_frames(plan.total_frames)?;
    for layer in &plan.layers {
        compositor.create_layer(layer)?;
    }
    tracing::debug!(
        layers = plan.layers.len(),
        total_frames = plan.total_frames,
        "plan mounted"
    );
    Ok(())
}

/// Compositor that only records the requests it receives.
#[derive(Debug, Default)]
pub struct RecordingCompositor {
    duration_frames: Option<u64>,
    layers: Vec<Layer>,
}

impl RecordingCompositor {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last duration set, if any.
    pub fn duration_frames(&self) -> Option<u64> {
        self.duration_frames
    }

    /// Layers created so far, in creation order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}

impl Compositor for RecordingCompositor {
    fn set_duration_frames(&mut self, frames: u64) -> ReelResult<()> {
        self.duration_frames = Some(frames);
        Ok(())
    }

    fn create_layer(&mut self, layer: &Layer) -> ReelResult<()> {
        self.layers.push(layer.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
