use super::*;

const DOC: &str = r#"{
  "id": "demo",
  "playlist": ["intro", "still", "intro"],
  "media": {
    "intro": { "type": "video", "video": "/media/intro.mp4" },
    "still": { "type": "img", "img": "/media/still.png", "duration": 4 },
    "unused": { "type": "image", "src": "/media/other.png" }
  },
  "tracks": [ { "src": "/audio/a.mp3", "duration": 10 } ],
  "config": { "backgroundMusicVolume": 0.5, "audioLoopEnabled": true }
}"#;

#[test]
fn parses_full_document() {
    let cfg = MediaConfig::from_json_str(DOC).unwrap();
    assert_eq!(cfg.id.as_deref(), Some("demo"));
    assert_eq!(cfg.playlist.len(), 3);
    assert_eq!(cfg.media["still"].kind, VisualKind::Image);
    assert_eq!(cfg.media["unused"].kind, VisualKind::Image);
    assert_eq!(cfg.media["still"].duration, Some(4.0));
    assert_eq!(cfg.tracks[0].duration, 10.0);
    assert_eq!(cfg.config.background_music_volume, 0.5);
    assert!(cfg.config.audio_loop_enabled);
    assert_eq!(cfg.count_of(VisualKind::Video), 2);
    assert_eq!(cfg.count_of(VisualKind::Image), 1);
}

#[test]
fn missing_config_block_uses_defaults() {
    let cfg = MediaConfig::from_json_str(r#"{ "playlist": [] }"#).unwrap();
    assert_eq!(cfg.config, PlaybackConfig::default());
    assert_eq!(cfg.config.background_music_volume, 1.0);
    assert!(!cfg.config.audio_loop_enabled);
    assert!(cfg.tracks.is_empty());
}

#[test]
fn locator_prefers_kind_field_then_src() {
    let item = MediaItem {
        kind: VisualKind::Video,
        video: Some("v.mp4".to_string()),
        img: None,
        src: Some("s.mp4".to_string()),
        duration: None,
    };
    assert_eq!(item.locator(), Some("v.mp4"));

    let item = MediaItem {
        video: None,
        ..item
    };
    assert_eq!(item.locator(), Some("s.mp4"));

    let item = MediaItem {
        src: Some("  ".to_string()),
        ..item
    };
    assert_eq!(item.locator(), None);
}

#[test]
fn unknown_playlist_id_is_rejected() {
    let err = MediaConfig::from_json_str(r#"{ "playlist": ["nope"] }"#).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
    assert!(err.to_string().contains("nope"));
}

#[test]
fn malformed_json_is_config_error() {
    let err = MediaConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ReelError::Config(_)));
}

#[test]
fn missing_file_is_config_error() {
    let err = MediaConfig::from_path(Path::new("target/does-not-exist/playlist.json")).unwrap_err();
    assert!(matches!(err, ReelError::Config(_)));
}

#[test]
fn validate_rejects_bad_values() {
    let base = MediaConfig::from_json_str(DOC).unwrap();

    let mut cfg = base.clone();
    cfg.config.background_music_volume = 1.5;
    assert!(matches!(cfg.validate(), Err(ReelError::Validation(_))));

    let mut cfg = base.clone();
    cfg.tracks[0].duration = -1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = base.clone();
    cfg.tracks[0].src = String::new();
    assert!(cfg.validate().is_err());

    let mut cfg = base.clone();
    if let Some(still) = cfg.media.get_mut("still") {
        still.duration = Some(f64::NAN);
    }
    assert!(cfg.validate().is_err());

    let mut cfg = base;
    if let Some(intro) = cfg.media.get_mut("intro") {
        intro.video = None;
    }
    assert!(cfg.validate().is_err());
}

#[test]
fn playlist_items_follow_play_order() {
    let cfg = MediaConfig::from_json_str(DOC).unwrap();
    let ids: Vec<&str> = cfg.playlist_items().unwrap().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec!["intro", "still", "intro"]);
}

#[test]
fn loop_with_zero_length_cycle_is_rejected_up_front() {
    let doc = r#"{
      "tracks": [ { "src": "a.mp3" }, { "src": "b.mp3", "duration": 0 } ],
      "config": { "audioLoopEnabled": true }
    }"#;
    let err = MediaConfig::from_json_str(doc).unwrap_err();
    assert!(matches!(err, ReelError::Config(_)));

    let doc = r#"{
      "tracks": [ { "src": "a.mp3", "duration": 10 }, { "src": "b.mp3", "duration": 0 } ],
      "config": { "audioLoopEnabled": true }
    }"#;
    let err = MediaConfig::from_json_str(doc).unwrap_err();
    assert!(matches!(err, ReelError::Config(_)));

    let doc = r#"{ "tracks": [ { "src": "a.mp3" } ] }"#;
    assert!(MediaConfig::from_json_str(doc).is_ok());
}
