use super::*;

fn tracks(durations: &[f64]) -> Vec<TrackConfig> {
    durations
        .iter()
        .enumerate()
        .map(|(i, d)| TrackConfig {
            src: format!("t{i}.mp3"),
            duration: *d,
        })
        .collect()
}

fn audio(secs: Option<f64>) -> ResolvedSource {
    ResolvedSource::new(MediaKind::Audio, "t", secs)
}

fn starts(plan: &AudioPlan) -> Vec<f64> {
    plan.entries.iter().map(|e| e.start_secs).collect()
}

#[test]
fn loop_covers_timeline_across_cycles() {
    let plan = build_audio_schedule(&tracks(&[10.0, 15.0]), &[], 40.0, true, 0.8, 3).unwrap();
    assert_eq!(plan.mode, AudioMode::Loop);
    assert_eq!(starts(&plan), vec![0.0, 10.0, 25.0, 35.0]);
    let sources: Vec<usize> = plan.entries.iter().map(|e| e.source_index).collect();
    assert_eq!(sources, vec![0, 1, 0, 1]);
    assert!(plan.entries.iter().all(|e| e.layer_index == 3));
    assert!(plan.entries.iter().all(|e| e.volume == Some(0.8)));
}

#[test]
fn loop_stops_at_visual_end() {
    let plan = build_audio_schedule(&tracks(&[10.0, 15.0]), &[], 20.0, true, 1.0, 0).unwrap();
    assert_eq!(starts(&plan), vec![0.0, 10.0]);

    let plan = build_audio_schedule(&tracks(&[10.0, 15.0]), &[], 10.0, true, 1.0, 0).unwrap();
    assert_eq!(starts(&plan), vec![0.0]);
}

#[test]
fn loop_uses_declared_durations() {
    let plan = build_audio_schedule(
        &tracks(&[10.0, 15.0]),
        &[audio(Some(99.0)), audio(Some(99.0))],
        30.0,
        true,
        1.0,
        0,
    )
    .unwrap();
    assert_eq!(plan.entries[0].duration_secs, 10.0);
    assert_eq!(plan.entries[1].duration_secs, 15.0);
}

#[test]
fn loop_respects_safety_cap() {
    let plan = build_audio_schedule(&tracks(&[0.1]), &[], 1000.0, true, 1.0, 0).unwrap();
    assert_eq!(plan.entries.len(), MAX_LOOP_ENTRIES);
    assert!(
        plan.entries
            .windows(2)
            .all(|w| w[1].start_secs > w[0].start_secs)
    );
}

#[test]
fn loop_with_empty_timeline_schedules_nothing() {
    let plan = build_audio_schedule(&tracks(&[10.0]), &[], 0.0, true, 1.0, 0).unwrap();
    assert_eq!(plan.mode, AudioMode::Loop);
    assert!(plan.entries.is_empty());
}

#[test]
fn loop_rejects_zero_cycle() {
    let err = build_audio_schedule(&tracks(&[0.0, 0.0]), &[], 30.0, true, 1.0, 0).unwrap_err();
    assert!(matches!(err, ReelError::Config(_)));

    let err = build_audio_schedule(&tracks(&[5.0, 0.0]), &[], 30.0, true, 1.0, 0).unwrap_err();
    assert!(matches!(err, ReelError::Config(_)));
}

#[test]
fn sequential_plays_each_track_once() {
    let plan = build_audio_schedule(
        &tracks(&[1.0, 1.0, 1.0]),
        &[audio(Some(30.0)), audio(None), audio(Some(12.0))],
        5.0,
        false,
        0.5,
        2,
    )
    .unwrap();
    assert_eq!(plan.mode, AudioMode::Sequential);
    assert_eq!(starts(&plan), vec![0.0, 30.0, 210.0]);
    let durations: Vec<f64> = plan.entries.iter().map(|e| e.duration_secs).collect();
    assert_eq!(durations, vec![30.0, 180.0, 12.0]);
}

#[test]
fn loop_without_tracks_is_sequential_and_empty() {
    let plan = build_audio_schedule(&[], &[], 30.0, true, 1.0, 0).unwrap();
    assert_eq!(plan.mode, AudioMode::Sequential);
    assert!(plan.entries.is_empty());
}

#[test]
fn sequential_requires_one_source_per_track() {
    let err = build_audio_schedule(&tracks(&[1.0, 2.0]), &[audio(None)], 5.0, false, 1.0, 0)
        .unwrap_err();
    assert!(matches!(err, ReelError::Schedule(_)));
}
