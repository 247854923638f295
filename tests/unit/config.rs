use std::collections::HashMap;

use super::*;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_match_documented_values() {
    let cfg = ReelConfig::default();
    assert_eq!(cfg.output_path, PathBuf::from("video.mp4"));
    assert_eq!(cfg.fps, 24);
    assert_eq!(cfg.video_codec, "libx264");
    assert_eq!(cfg.audio_codec, "aac");
    assert!(cfg.overwrite);
    cfg.validate().unwrap();
    assert_eq!(cfg.canvas().unwrap(), None);
}

#[test]
fn json_keeps_defaults_for_missing_keys() {
    let cfg: ReelConfig = serde_json::from_str(r#"{ "fps": 30, "threads": 2 }"#).unwrap();
    assert_eq!(cfg.fps, 30);
    assert_eq!(cfg.threads, Some(2));
    assert_eq!(cfg.video_codec, "libx264");
    assert_eq!(cfg.output_path, PathBuf::from("video.mp4"));
}

#[test]
fn json_rejects_unknown_keys() {
    assert!(serde_json::from_str::<ReelConfig>(r#"{ "frame_rate": 30 }"#).is_err());
}

#[test]
fn from_path_failures_are_config_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = ReelConfig::from_path(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(missing, ReelError::Config(_)), "{missing}");

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();
    let parse = ReelConfig::from_path(&bad).unwrap_err();
    assert!(matches!(parse, ReelError::Config(_)), "{parse}");

    let good = dir.path().join("good.json");
    std::fs::write(&good, r#"{ "fps": 25 }"#).unwrap();
    assert_eq!(ReelConfig::from_path(&good).unwrap().fps, 25);
}

#[test]
fn env_overrides_file_values() {
    let mut cfg = ReelConfig::default();
    cfg.apply_vars(vars(&[
        ("STORYREEL_OUTPUT", "out/final.mp4"),
        ("STORYREEL_FPS", "30"),
        ("STORYREEL_CODEC", "libx265"),
        ("STORYREEL_THREADS", "4"),
    ]))
    .unwrap();
    assert_eq!(cfg.output_path, PathBuf::from("out/final.mp4"));
    assert_eq!(cfg.fps, 30);
    assert_eq!(cfg.video_codec, "libx265");
    assert_eq!(cfg.threads, Some(4));
}

#[test]
fn env_with_garbage_number_is_config_error() {
    let mut cfg = ReelConfig::default();
    let err = cfg
        .apply_vars(vars(&[("STORYREEL_FPS", "fast")]))
        .unwrap_err();
    assert!(matches!(err, ReelError::Config(_)));
    assert!(err.to_string().contains("STORYREEL_FPS"));
}

#[test]
fn validate_catches_bad_values() {
    let bad = [
        ReelConfig {
            fps: 0,
            ..ReelConfig::default()
        },
        ReelConfig {
            video_codec: " ".to_string(),
            ..ReelConfig::default()
        },
        ReelConfig {
            threads: Some(0),
            ..ReelConfig::default()
        },
        ReelConfig {
            fetch_timeout_secs: 0,
            ..ReelConfig::default()
        },
        ReelConfig {
            width: Some(641),
            height: Some(480),
            ..ReelConfig::default()
        },
        ReelConfig {
            width: Some(640),
            ..ReelConfig::default()
        },
    ];
    for cfg in bad {
        assert!(cfg.validate().is_err(), "{cfg:?} should be rejected");
    }

    let ok = ReelConfig {
        width: Some(640),
        height: Some(480),
        ..ReelConfig::default()
    };
    assert_eq!(
        ok.canvas().unwrap(),
        Some(Canvas {
            width: 640,
            height: 480
        })
    );
}

#[test]
fn service_config_requires_both_keys() {
    let err = ServiceConfig::from_vars(vars(&[("OPENAI_API_KEY", "sk-1")])).unwrap_err();
    assert!(err.to_string().contains("MURF_API_KEY"));

    let cfg = ServiceConfig::from_vars(vars(&[
        ("OPENAI_API_KEY", "sk-1"),
        ("MURF_API_KEY", "murf-1"),
    ]))
    .unwrap();
    assert_eq!(cfg.openai_base_url, ServiceConfig::OPENAI_BASE_URL);
    assert_eq!(cfg.script_model, "gpt-4o");
    assert_eq!(cfg.image_model, "dall-e-3");
}
