use crate::{
    assets::source::{MediaKind, ResolvedSource},
    foundation::error::{ReelError, ReelResult},
    playlist::model::TrackConfig,
    timeline::duration::resolve_duration,
    timeline::schedule::TimelineEntry,
};

/// Upper bound on entries emitted by loop-filling.
pub const MAX_LOOP_ENTRIES: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
/// How background tracks were laid out.
pub enum AudioMode {
    /// Every track once, back to back, from offset 0.
    Sequential,
    /// Tracks tiled cycle after cycle until the visual timeline is covered.
    Loop,
}

/// Audio entries plus the mode that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioPlan {
    /// Layout mode.
    pub mode: AudioMode,
    /// Entries in start order.
    pub entries: Vec<TimelineEntry>,
}

/// Schedule the background tracks against a visual timeline of `total_visual_secs`.
///
/// Without looping (or without tracks) every track plays once; offsets are the running sum of
/// resolved source durations and are independent of the visual length. With looping, declared
/// track durations define the cycle, which is repeated `ceil(total / cycle)` times; a candidate
/// starting at or past the visual end stops scheduling, as does reaching
/// [`MAX_LOOP_ENTRIES`].
pub fn build_audio_schedule(
    tracks: &[TrackConfig],
    sources: &[ResolvedSource],
    total_visual_secs: f64,
    loop_enabled: bool,
    volume: f64,
    layer_index: usize,
) -> ReelResult<AudioPlan> {
    if loop_enabled && !tracks.is_empty() {
        let entries = loop_fill(tracks, total_visual_secs, volume, layer_index)?;
        return Ok(AudioPlan {
            mode: AudioMode::Loop,
            entries,
        });
    }

    if sources.len() != tracks.len() {
        return Err(ReelError::schedule(format!(
            "{} tracks configured but {} track sources loaded",
            tracks.len(),
            sources.len()
        )));
    }
    Ok(AudioPlan {
        mode: AudioMode::Sequential,
        entries: sequential(sources, volume, layer_index),
    })
}

fn sequential(sources: &[ResolvedSource], volume: f64, layer_index: usize) -> Vec<TimelineEntry> {
    sources
        .iter()
        .enumerate()
        .scan(0.0f64, |offset, (i, source)| {
            let d = resolve_duration(MediaKind::Audio, Some(source), None);
            let entry = TimelineEntry::audio(i, *offset, d, layer_index, volume);
            *offset += d;
            Some(entry)
        })
        .collect()
}

fn loop_fill(
    tracks: &[TrackConfig],
    total_visual_secs: f64,
    volume: f64,
    layer_index: usize,
) -> ReelResult<Vec<TimelineEntry>> {
    let cycle_secs = tracks.iter().fold(0.0, |acc, t| acc + t.duration);
    if !cycle_secs.is_finite() || cycle_secs <= 0.0 {
        return Err(ReelError::config(
            "audio loop enabled but the track cycle has zero length",
        ));
    }
    if let Some(i) = tracks.iter().position(|t| t.duration <= 0.0) {
        return Err(ReelError::config(format!(
            "audio loop enabled but track {i} declares a non-positive duration"
        )));
    }

    let cycles_needed = (total_visual_secs / cycle_secs).ceil().max(0.0) as u64;
    tracing::debug!(cycle_secs, cycles_needed, "loop-filling audio");

    let mut entries = Vec::new();
    let mut delay_secs = 0.0f64;
    'cycles: for _cycle in 0..cycles_needed {
        for (i, track) in tracks.iter().enumerate() {
            if delay_secs >= total_visual_secs {
                break 'cycles;
            }
            entries.push(TimelineEntry::audio(
                i,
                delay_secs,
                track.duration,
                layer_index,
                volume,
            ));
            delay_secs += track.duration;

            if entries.len() >= MAX_LOOP_ENTRIES {
                if delay_secs < total_visual_secs {
                    tracing::warn!(
                        entries = entries.len(),
                        covered_secs = delay_secs,
                        total_visual_secs,
                        "audio loop safety cap reached, remaining timeline left silent"
                    );
                }
                break 'cycles;
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/audio.rs"]
mod tests;
