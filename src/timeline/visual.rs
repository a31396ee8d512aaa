use crate::{
    assets::source::{MediaKind, ResolvedSource},
    foundation::error::{ReelError, ReelResult},
    playlist::model::{PlaylistItem, VisualKind},
    timeline::duration::resolve_duration,
    timeline::schedule::TimelineEntry,
};

/// Back-to-back visual layout of a playlist.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualLayout {
    /// Entries in playlist order, layers already assigned.
    pub entries: Vec<TimelineEntry>,
    /// Sum of all entry durations.
    pub total_secs: f64,
    /// Number of video entries.
    pub video_count: usize,
    /// Number of image entries.
    pub image_count: usize,
}

#[derive(Default)]
struct Cursor {
    offset_secs: f64,
    next_video: usize,
    next_image: usize,
    entries: Vec<TimelineEntry>,
}

/// Lay out playlist items end to end, starting at 0.
///
/// `videos` and `images` are the loaded sources in playlist order among their own kind. Video
/// entries are trimmed to their resolved duration so a longer source is cut, never looped or
/// stretched. Layers are grouped by kind: videos take `[0, n_video)` and images
/// `[n_video, n_video + n_image)`, each in playlist order, regardless of interleaving.
pub fn build_visual_layout(
    items: &[PlaylistItem<'_>],
    videos: &[ResolvedSource],
    images: &[ResolvedSource],
) -> ReelResult<VisualLayout> {
    let cursor = items.iter().try_fold(Cursor::default(), |mut cur, item| {
        let entry = match item.media.kind {
            VisualKind::Video => {
                let source = videos.get(cur.next_video).ok_or_else(|| {
                    missing_source("video", cur.next_video, videos.len(), item.id)
                })?;
                let d = resolve_duration(MediaKind::Video, Some(source), None);
                cur.next_video += 1;
                TimelineEntry::video(cur.next_video - 1, cur.offset_secs, d)
            }
            VisualKind::Image => {
                let source = images.get(cur.next_image).ok_or_else(|| {
                    missing_source("image", cur.next_image, images.len(), item.id)
                })?;
                let d = resolve_duration(MediaKind::Image, Some(source), item.media.duration);
                cur.next_image += 1;
                TimelineEntry::image(cur.next_image - 1, cur.offset_secs, d)
            }
        };
        cur.offset_secs += entry.duration_secs;
        cur.entries.push(entry);
        Ok::<_, ReelError>(cur)
    })?;

    let Cursor {
        offset_secs,
        next_video: video_count,
        next_image: image_count,
        mut entries,
    } = cursor;

    for entry in &mut entries {
        entry.layer_index = match entry.kind {
            MediaKind::Video => entry.source_index,
            _ => video_count + entry.source_index,
        };
    }

    Ok(VisualLayout {
        entries,
        total_secs: offset_secs,
        video_count,
        image_count,
    })
}

fn missing_source(kind: &str, index: usize, loaded: usize, id: &str) -> ReelError {
    ReelError::schedule(format!(
        "playlist item '{id}' needs {kind} source #{index} but only {loaded} were loaded"
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/visual.rs"]
mod tests;
