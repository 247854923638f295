use tracing::debug;

use crate::assets::media::MediaProbe;
use crate::assets::workspace::SceneAssets;
use crate::clip::SceneClip;
use crate::clip::duration::resolve_display_secs;
use crate::foundation::error::ReelResult;

/// Turns a scene's materialized assets into a timed [`SceneClip`].
#[derive(Clone, Copy)]
pub struct ClipBuilder<'a> {
    probe: &'a dyn MediaProbe,
}

impl<'a> ClipBuilder<'a> {
    /// Create a builder that decodes media with `probe`.
    pub fn new(probe: &'a dyn MediaProbe) -> Self {
        Self { probe }
    }

    /// Decode the narration, resolve the display duration, and check the still decodes.
    ///
    /// Narration shorter than the display duration is left with silence at the tail. On error
    /// the scene's storage is released before returning.
    pub fn build(&self, assets: SceneAssets) -> ReelResult<SceneClip> {
        let index = assets.index();
        let audio_info = self
            .probe
            .probe_audio(assets.audio.path())
            .map_err(|e| e.with_scene(index))?;
        let display_secs = resolve_display_secs(&audio_info);
        let image_info = self
            .probe
            .probe_image(assets.image.path())
            .map_err(|e| e.with_scene(index))?;

        debug!(
            scene = index,
            audio_secs = audio_info.duration_secs(),
            display_secs,
            width = image_info.width,
            height = image_info.height,
            "clip built"
        );

        let SceneAssets {
            workspace,
            image,
            audio,
        } = assets;
        Ok(SceneClip {
            index,
            image,
            audio,
            image_info,
            audio_info,
            display_secs,
            _workspace: workspace,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clip/builder.rs"]
mod tests;
