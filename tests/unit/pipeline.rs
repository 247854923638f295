use std::path::Path;

use super::*;
use crate::assets::media::{AudioInfo, ImageInfo};
use crate::encode::sink::InMemorySink;
use crate::scene::SceneSource;
use crate::test_support::{EchoFetcher, TextProbe};

fn scenes(durations: &[&str]) -> Vec<Scene> {
    Scene::sequence(
        durations
            .iter()
            .map(|d| SceneSource::new("https://img.test/64x64", format!("https://tts.test/{d}"))),
    )
}

#[test]
fn failed_state_follows_error_kind() {
    let fetch = ReelError::asset_fetch("https://x/a.png", "timeout").with_scene(2);
    assert_eq!(RunState::failed(&fetch), Some(RunState::FailedFetch(2)));

    let decode = ReelError::asset_decode("/tmp/a.wav", "bad header").with_scene(0);
    assert_eq!(RunState::failed(&decode), Some(RunState::FailedDecode(0)));

    assert_eq!(
        RunState::failed(&ReelError::video_encode("boom")),
        Some(RunState::FailedExport)
    );
    assert_eq!(
        RunState::failed(&ReelError::EmptyTimeline),
        Some(RunState::FailedExport)
    );
    assert_eq!(RunState::failed(&ReelError::config("nope")), None);
    assert_eq!(
        RunState::failed(&ReelError::asset_fetch("https://x", "untagged")),
        None
    );
}

#[test]
fn terminal_states() {
    assert!(RunState::Done.is_terminal());
    assert!(RunState::FailedFetch(0).is_terminal());
    assert!(!RunState::Fetching(0).is_terminal());
    assert!(!RunState::Exporting.is_terminal());
    assert_eq!(RunState::Building(3).to_string(), "building scene 3");
}

#[test]
fn run_reports_per_scene_timing() {
    let config = ReelConfig::default();
    let mut sink = InMemorySink::new();
    let report = Pipeline::new(&config, &EchoFetcher, &TextProbe)
        .run(&scenes(&["4.2", "1.0", "7.9"]), &mut sink)
        .unwrap();

    assert_eq!(report.total_secs, 15);
    assert_eq!(report.output_path, None);
    let display: Vec<u32> = report.clips.iter().map(|c| c.display_secs).collect();
    assert_eq!(display, vec![5, 2, 8]);
    let order: Vec<usize> = report.clips.iter().map(|c| c.index).collect();
    assert_eq!(order, vec![0, 1, 2]);
    assert!(sink.finished());
}

#[test]
fn sequential_mode_matches_parallel() {
    let parallel = ReelConfig::default();
    let sequential = ReelConfig {
        parallel: false,
        ..ReelConfig::default()
    };
    let input = scenes(&["0", "2.5", "3"]);

    let a = Pipeline::new(&parallel, &EchoFetcher, &TextProbe)
        .run(&input, &mut InMemorySink::new())
        .unwrap();
    let b = Pipeline::new(&sequential, &EchoFetcher, &TextProbe)
        .run(&input, &mut InMemorySink::new())
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_scene_list_is_empty_timeline() {
    let config = ReelConfig::default();
    let mut sink = InMemorySink::new();
    let err = Pipeline::new(&config, &EchoFetcher, &TextProbe)
        .run(&[], &mut sink)
        .unwrap_err();
    assert!(matches!(err, ReelError::EmptyTimeline));
    assert!(sink.config().is_none());
}

#[test]
fn out_of_order_scenes_are_rejected() {
    let mut input = scenes(&["1", "1"]);
    input.reverse();
    let config = ReelConfig::default();
    let err = Pipeline::new(&config, &EchoFetcher, &TextProbe)
        .run(&input, &mut InMemorySink::new())
        .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn decode_failure_names_the_scene() {
    let config = ReelConfig::default();
    let err = Pipeline::new(&config, &EchoFetcher, &TextProbe)
        .run(&scenes(&["1", "oops", "2"]), &mut InMemorySink::new())
        .unwrap_err();
    assert!(matches!(err, ReelError::AssetDecode { .. }));
    assert_eq!(err.scene(), Some(1));
}

#[test]
fn zero_threads_is_config_error() {
    assert!(matches!(
        build_thread_pool(Some(0)),
        Err(ReelError::Config(_))
    ));
    assert!(build_thread_pool(Some(2)).is_ok());
}

/// Behaves like a host where the audio probe tool is not installed.
struct ToolMissingProbe;

impl MediaProbe for ToolMissingProbe {
    fn probe_audio(&self, _path: &Path) -> ReelResult<AudioInfo> {
        Err(ReelError::config("ffprobe is required to read narration length"))
    }

    fn probe_image(&self, _path: &Path) -> ReelResult<ImageInfo> {
        Ok(ImageInfo {
            width: 64,
            height: 64,
        })
    }
}

#[test]
fn missing_probe_tool_is_not_reported_as_corrupt_scene() {
    let config = ReelConfig::default();
    let err = Pipeline::new(&config, &EchoFetcher, &ToolMissingProbe)
        .run(&scenes(&["1.0"]), &mut InMemorySink::new())
        .unwrap_err();
    assert!(matches!(err, ReelError::Config(_)), "{err}");
    assert_eq!(err.scene(), None);
    assert_eq!(RunState::failed(&err), None);
}
