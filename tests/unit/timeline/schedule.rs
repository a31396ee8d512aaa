use super::*;
use crate::{
    assets::source::ResolvedSource,
    playlist::dsl::MediaConfigBuilder,
};

fn sources(videos: &[Option<f64>], images: usize, tracks: &[Option<f64>]) -> LoadedSources {
    LoadedSources {
        videos: videos
            .iter()
            .map(|d| ResolvedSource::new(MediaKind::Video, "v", *d))
            .collect(),
        images: (0..images)
            .map(|_| ResolvedSource::new(MediaKind::Image, "i", None))
            .collect(),
        tracks: tracks
            .iter()
            .map(|d| ResolvedSource::new(MediaKind::Audio, "t", *d))
            .collect(),
    }
}

#[test]
fn builds_mixed_schedule_with_audio_on_top() {
    let cfg = MediaConfigBuilder::new()
        .video("v", "v.mp4")
        .unwrap()
        .image("i", "i.png", Some(4.0))
        .unwrap()
        .track("a.mp3", 10.0)
        .track("b.mp3", 15.0)
        .audio_loop(true)
        .volume(0.5)
        .build()
        .unwrap();
    let loaded = sources(&[Some(16.0)], 1, &[Some(10.0), Some(15.0)]);

    let schedule = build_schedule(&cfg, &loaded).unwrap();
    assert_eq!(schedule.total_secs(), 20.0);
    assert_eq!(schedule.total_frames(), 600);
    assert_eq!(schedule.fps(), FRAME_RATE);
    assert_eq!(schedule.video_count(), 1);
    assert_eq!(schedule.image_count(), 1);
    assert_eq!(schedule.audio_layer_index(), 2);
    assert_eq!(schedule.audio_mode(), AudioMode::Loop);

    let audio = schedule.audio_entries();
    assert_eq!(audio.len(), 2);
    assert!(audio.iter().all(|e| e.layer_index == 2));
    assert!(audio.iter().all(|e| e.volume == Some(0.5)));

    let v = &schedule.visual_entries()[1];
    assert_eq!(v.start_frame, FrameIndex(480));
    assert_eq!(v.duration_frames, 120);
}

#[test]
fn sequential_audio_is_independent_of_visual_length() {
    let cfg = MediaConfigBuilder::new()
        .image("i", "i.png", Some(2.0))
        .unwrap()
        .track("a.mp3", 0.0)
        .track("b.mp3", 0.0)
        .build()
        .unwrap();
    let loaded = sources(&[], 1, &[Some(60.0), Some(30.0)]);

    let schedule = build_schedule(&cfg, &loaded).unwrap();
    assert_eq!(schedule.audio_mode(), AudioMode::Sequential);
    let starts: Vec<f64> = schedule.audio_entries().iter().map(|e| e.start_secs).collect();
    assert_eq!(starts, vec![0.0, 60.0]);
    assert_eq!(schedule.total_secs(), 2.0);
}

#[test]
fn empty_playlist_is_valid_and_empty() {
    let schedule = build_schedule(&MediaConfig::default(), &LoadedSources::default()).unwrap();
    assert!(schedule.is_empty());
    assert_eq!(schedule.total_secs(), 0.0);
    assert_eq!(schedule.total_frames(), 0);
    assert_eq!(schedule.audio_layer_index(), 0);
    assert!(schedule.clock().is_empty());
}

#[test]
fn visual_starts_are_prefix_sums() {
    let cfg = MediaConfigBuilder::new()
        .video("a", "a.mp4")
        .unwrap()
        .video("b", "b.mp4")
        .unwrap()
        .image("c", "c.png", None)
        .unwrap()
        .play("a")
        .unwrap()
        .build()
        .unwrap();
    let loaded = sources(&[Some(3.0), Some(7.0), Some(3.0)], 1, &[]);

    let schedule = build_schedule(&cfg, &loaded).unwrap();
    let mut expected = 0.0;
    for e in schedule.visual_entries() {
        assert_eq!(e.start_secs, expected);
        expected += e.duration_secs;
    }
    assert_eq!(schedule.total_secs(), expected);
    assert_eq!(schedule.total_secs(), 18.0);
}

#[test]
fn new_rejects_gaps_and_bad_layers() {
    let gap = vec![
        TimelineEntry::image(0, 0.0, 2.0),
        TimelineEntry::image(1, 3.0, 2.0),
    ];
    assert!(Schedule::new(gap, vec![], AudioMode::Sequential).is_err());

    let wrong_layer = vec![TimelineEntry::video(0, 0.0, 2.0)];
    let mut entries = wrong_layer;
    entries[0].layer_index = 4;
    assert!(Schedule::new(entries, vec![], AudioMode::Sequential).is_err());

    let ok = vec![TimelineEntry::video(0, 0.0, 2.0)];
    let late_audio = vec![TimelineEntry::audio(0, 2.0, 1.0, 1, 1.0)];
    assert!(Schedule::new(ok.clone(), late_audio, AudioMode::Loop).is_err());

    let audio = vec![TimelineEntry::audio(0, 0.0, 1.0, 1, 1.0)];
    assert!(Schedule::new(ok, audio, AudioMode::Loop).is_ok());
}

#[test]
fn schedule_serializes_entries() {
    let schedule = Schedule::new(
        vec![TimelineEntry::video(0, 0.0, 2.0)],
        vec![],
        AudioMode::Sequential,
    )
    .unwrap();
    let json = serde_json::to_value(&schedule).unwrap();
    assert_eq!(json["total_frames"], 60);
    assert_eq!(json["audio_mode"], "sequential");
    assert_eq!(json["visual_entries"][0]["kind"], "video");
    assert_eq!(json["visual_entries"][0]["trim"]["end_secs"], 2.0);
    assert!(json["visual_entries"][0].get("volume").is_none());
}

#[test]
fn each_visual_entry_ends_where_the_next_starts() {
    let cfg = MediaConfigBuilder::new()
        .video("a", "a.mp4")
        .unwrap()
        .image("b", "b.png", Some(2.5))
        .unwrap()
        .video("c", "c.mp4")
        .unwrap()
        .build()
        .unwrap();
    let loaded = sources(&[Some(11.1), Some(4.2)], 1, &[]);

    let schedule = build_schedule(&cfg, &loaded).unwrap();
    let entries = schedule.visual_entries();
    for pair in entries.windows(2) {
        assert_eq!(pair[0].end_secs(), pair[1].start_secs);
    }
    assert_eq!(entries[2].end_secs(), schedule.total_secs());
}
