use crate::foundation::core::{FRAME_RATE, FrameIndex};

/// Whole frames for `secs` at [`FRAME_RATE`], rounded to nearest.
pub fn to_frames(secs: f64) -> u64 {
    FRAME_RATE.secs_to_frames_round(secs)
}

/// Seconds for a frame position against the composition totals.
///
/// When `total_frames` is the rounded frame count of `total_secs` the frame is converted at
/// [`FRAME_RATE`] directly, so `to_seconds(to_frames(t), ..)` returns `t` exactly for any
/// frame-aligned `t`. Inconsistent totals fall back to a linear mapping. Returns 0 for a
/// degenerate (empty) composition instead of dividing by zero.
pub fn to_seconds(frames: u64, total_frames: u64, total_secs: f64) -> f64 {
    if total_frames == 0 || total_secs.is_nan() || total_secs <= 0.0 {
        return 0.0;
    }
    if total_frames == to_frames(total_secs) {
        return FRAME_RATE.frames_to_secs(frames);
    }
    (frames as f64) * total_secs / (total_frames as f64)
}

/// Bidirectional seconds/frame mapping for one composition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    total_frames: u64,
    total_secs: f64,
}

impl FrameClock {
    /// Clock for a composition of `total_secs`; total frames are derived by rounding.
    pub fn new(total_secs: f64) -> Self {
        let total_secs = if total_secs.is_finite() {
            total_secs.max(0.0)
        } else {
            0.0
        };
        Self {
            total_frames: to_frames(total_secs),
            total_secs,
        }
    }

    /// Total composition length in frames.
    pub fn total_frames(self) -> u64 {
        self.total_frames
    }

    /// Total composition length in seconds.
    pub fn total_secs(self) -> f64 {
        self.total_secs
    }

    /// `true` for a zero-length composition.
    pub fn is_empty(self) -> bool {
        self.total_frames == 0
    }

    /// Frame to hand the player when seeking to `secs`, clamped to the composition.
    pub fn seek_frame(self, secs: f64) -> FrameIndex {
        let secs = self.clamp_secs(secs);
        FrameIndex(to_frames(secs).min(self.total_frames))
    }

    /// Seconds for a reported player frame.
    pub fn frame_to_secs(self, frame: FrameIndex) -> f64 {
        to_seconds(frame.0, self.total_frames, self.total_secs)
    }

    /// Clamp `secs` to `[0, total_secs]`; NaN maps to 0.
    pub fn clamp_secs(self, secs: f64) -> f64 {
        if secs.is_nan() {
            return 0.0;
        }
        secs.clamp(0.0, self.total_secs)
    }

    /// Position as a fraction of the composition in `[0, 1]`; 0 when empty.
    pub fn fraction(self, secs: f64) -> f64 {
        if self.total_secs <= 0.0 {
            return 0.0;
        }
        (self.clamp_secs(secs) / self.total_secs).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/frames.rs"]
mod tests;
