//! Prompt to scene list: script, then one image and one voice-over per scene.

use tracing::{debug, info};

use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::{Scene, SceneSource};
use crate::services::{ImageGenerator, ScriptSource, VoiceSynthesizer};

/// Generate the scenes for `prompt`.
///
/// Script order is kept: scene `i` of the result comes from line `i` of the script. The first
/// service failure aborts; an empty script is [`ReelError::EmptyTimeline`].
#[tracing::instrument(skip_all)]
pub fn build_storyboard(
    prompt: &str,
    script_source: &dyn ScriptSource,
    images: &dyn ImageGenerator,
    voices: &dyn VoiceSynthesizer,
) -> ReelResult<Vec<Scene>> {
    if prompt.trim().is_empty() {
        return Err(ReelError::validation("prompt must not be empty"));
    }

    let script = script_source.generate_script(prompt)?;
    if script.scenes.is_empty() {
        return Err(ReelError::EmptyTimeline);
    }

    let mut sources = Vec::with_capacity(script.scenes.len());
    for (index, line) in script.scenes.iter().enumerate() {
        debug!(scene = index, voice = %line.voice, "generating scene assets");
        let image_url = images.generate_image(&line.image)?;
        let voiceover_url = voices.synthesize(&line.voice, &line.text)?;
        sources.push(SceneSource::new(image_url, voiceover_url));
    }

    info!(scenes = sources.len(), "storyboard ready");
    Ok(Scene::sequence(sources))
}

#[cfg(test)]
#[path = "../tests/unit/storyboard.rs"]
mod tests;
