//! In-crate fakes shared by unit tests.

use std::path::Path;

use crate::assets::fetch::AssetFetcher;
use crate::assets::media::{AudioInfo, ImageInfo, MediaProbe};
use crate::assets::workspace::{RunWorkspace, SceneAssets};
use crate::clip::SceneClip;
use crate::clip::builder::ClipBuilder;
use crate::foundation::error::{ReelError, ReelResult};

/// Writes the URL's last path segment as the file body.
pub(crate) struct EchoFetcher;

impl AssetFetcher for EchoFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> ReelResult<()> {
        let body = url.rsplit('/').next().unwrap_or_default();
        std::fs::write(dest, body).map_err(|e| ReelError::asset_fetch(url, e))
    }
}

/// Audio bodies are decimal durations; image bodies are `WxH`.
pub(crate) struct TextProbe;

impl MediaProbe for TextProbe {
    fn probe_audio(&self, path: &Path) -> ReelResult<AudioInfo> {
        let text = std::fs::read_to_string(path).map_err(|e| ReelError::asset_decode(path, e))?;
        let secs = text
            .parse::<f64>()
            .map_err(|e| ReelError::asset_decode(path, e))?;
        AudioInfo::new(secs).map_err(|e| ReelError::asset_decode(path, e))
    }

    fn probe_image(&self, path: &Path) -> ReelResult<ImageInfo> {
        let text = std::fs::read_to_string(path).map_err(|e| ReelError::asset_decode(path, e))?;
        let parsed = text
            .split_once('x')
            .and_then(|(w, h)| Some((w.parse().ok()?, h.parse().ok()?)));
        match parsed {
            Some((width, height)) => Ok(ImageInfo { width, height }),
            None => Err(ReelError::asset_decode(path, "not an image")),
        }
    }
}

/// Fetch `image` / `audio` bodies for scene `index` through [`EchoFetcher`].
pub(crate) fn scene_assets(run: &RunWorkspace, index: usize, image: &str, audio: &str) -> SceneAssets {
    SceneAssets::fetch(
        run.scene(index).expect("scene workspace"),
        &EchoFetcher,
        &format!("https://img.test/{image}"),
        &format!("https://tts.test/{audio}"),
    )
    .expect("fetch scene assets")
}

/// Build a 64x64 clip for scene `index` whose narration lasts `audio_secs`.
pub(crate) fn clip(run: &RunWorkspace, index: usize, audio_secs: f64) -> SceneClip {
    ClipBuilder::new(&TextProbe)
        .build(scene_assets(run, index, "64x64", &audio_secs.to_string()))
        .expect("build clip")
}
