use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::asset_fetch("https://x/a.png", "boom")
            .to_string()
            .starts_with("asset fetch error:")
    );
    assert!(
        ReelError::asset_decode("a.wav", "boom")
            .to_string()
            .starts_with("asset decode error:")
    );
    assert!(
        ReelError::EmptyTimeline
            .to_string()
            .starts_with("empty timeline:")
    );
    assert!(
        ReelError::video_encode("x")
            .to_string()
            .contains("video encode error:")
    );
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ReelError::config("x").to_string().contains("config error:"));
    assert!(ReelError::service("x").to_string().contains("service error:"));
}

#[test]
fn with_scene_tags_asset_errors_only() {
    let err = ReelError::asset_fetch("https://x/a.png", "status 404").with_scene(3);
    assert_eq!(err.scene(), Some(3));
    assert!(err.to_string().contains("(scene 3)"));
    assert!(err.to_string().contains("https://x/a.png"));
    assert!(err.to_string().contains("status 404"));

    let err = ReelError::asset_decode("scene_1.wav", "no audio stream").with_scene(1);
    assert_eq!(err.scene(), Some(1));

    let err = ReelError::EmptyTimeline.with_scene(2);
    assert_eq!(err.scene(), None);
    assert!(matches!(err, ReelError::EmptyTimeline));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
