use super::*;
use crate::playlist::dsl::{image_item, video_item};

fn video(secs: Option<f64>) -> ResolvedSource {
    ResolvedSource::new(MediaKind::Video, "v", secs)
}

fn image() -> ResolvedSource {
    ResolvedSource::new(MediaKind::Image, "i", None)
}

#[test]
fn entries_are_back_to_back_from_zero() {
    let v = video_item("a.mp4");
    let i = image_item("b.png", Some(3.0));
    let items = [
        PlaylistItem { id: "v0", media: &v },
        PlaylistItem { id: "i0", media: &i },
        PlaylistItem { id: "v1", media: &v },
    ];
    let layout = build_visual_layout(
        &items,
        &[video(Some(12.0)), video(None)],
        &[image()],
    )
    .unwrap();

    let starts: Vec<f64> = layout.entries.iter().map(|e| e.start_secs).collect();
    let durations: Vec<f64> = layout.entries.iter().map(|e| e.duration_secs).collect();
    assert_eq!(starts, vec![0.0, 12.0, 15.0]);
    assert_eq!(durations, vec![12.0, 3.0, 10.0]);
    assert_eq!(layout.total_secs, 25.0);
    assert_eq!(layout.video_count, 2);
    assert_eq!(layout.image_count, 1);
}

#[test]
fn layers_are_grouped_by_kind() {
    let v = video_item("a.mp4");
    let i = image_item("b.png", None);
    let items = [
        PlaylistItem { id: "i0", media: &i },
        PlaylistItem { id: "v0", media: &v },
        PlaylistItem { id: "i1", media: &i },
        PlaylistItem { id: "v1", media: &v },
    ];
    let layout = build_visual_layout(
        &items,
        &[video(Some(1.0)), video(Some(2.0))],
        &[image(), image()],
    )
    .unwrap();

    let layers: Vec<usize> = layout.entries.iter().map(|e| e.layer_index).collect();
    assert_eq!(layers, vec![2, 0, 3, 1]);
    let sources: Vec<usize> = layout.entries.iter().map(|e| e.source_index).collect();
    assert_eq!(sources, vec![0, 0, 1, 1]);
}

#[test]
fn videos_are_trimmed_to_resolved_duration() {
    let v = video_item("a.mp4");
    let items = [PlaylistItem { id: "v0", media: &v }];
    let layout = build_visual_layout(&items, &[video(Some(7.5))], &[]).unwrap();
    let trim = layout.entries[0].trim.unwrap();
    assert_eq!(trim.start_secs, 0.0);
    assert_eq!(trim.end_secs, 7.5);
}

#[test]
fn empty_playlist_has_zero_length() {
    let layout = build_visual_layout(&[], &[], &[]).unwrap();
    assert!(layout.entries.is_empty());
    assert_eq!(layout.total_secs, 0.0);
}

#[test]
fn missing_source_is_schedule_error() {
    let v = video_item("a.mp4");
    let items = [PlaylistItem { id: "v0", media: &v }];
    let err = build_visual_layout(&items, &[], &[]).unwrap_err();
    assert!(matches!(err, ReelError::Schedule(_)));
}
