use crate::assets::source::{MediaKind, ResolvedSource};

/// Duration assumed for a video whose source reports none.
pub const VIDEO_FALLBACK_SECS: f64 = 10.0;
/// Duration assumed for an image without an explicit duration.
pub const IMAGE_FALLBACK_SECS: f64 = 5.0;
/// Duration assumed for an audio track whose source reports none.
pub const AUDIO_FALLBACK_SECS: f64 = 180.0;

/// Resolve the on-timeline duration of a source in seconds.
///
/// Videos and audio use the source's intrinsic duration, images use the explicit duration from
/// the playlist document. Missing, non-finite or non-positive values fall back to the per-kind
/// default and emit a warning; this never fails.
pub fn resolve_duration(
    kind: MediaKind,
    source: Option<&ResolvedSource>,
    explicit_secs: Option<f64>,
) -> f64 {
    let (candidate, fallback) = match kind {
        MediaKind::Video => (source.and_then(|s| s.duration_secs), VIDEO_FALLBACK_SECS),
        MediaKind::Image => (explicit_secs, IMAGE_FALLBACK_SECS),
        MediaKind::Audio => (source.and_then(|s| s.duration_secs), AUDIO_FALLBACK_SECS),
    };

    match candidate {
        Some(d) if is_usable(d) => d,
        other => {
            tracing::warn!(
                %kind,
                duration = ?other,
                fallback_secs = fallback,
                "invalid or missing duration, using fallback"
            );
            fallback
        }
    }
}

fn is_usable(secs: f64) -> bool {
    secs.is_finite() && secs > 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/duration.rs"]
mod tests;
