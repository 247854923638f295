//! Scene boundary model.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{ReelError, ReelResult};

/// Remote asset references for one scene, as produced by the image and voice services.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneSource {
    /// URL of the generated still image.
    #[serde(alias = "image")]
    pub image_url: String,
    /// URL of the generated voice-over audio.
    #[serde(alias = "voiceover")]
    pub voiceover_url: String,
}

impl SceneSource {
    /// Pair an image URL with a voice-over URL.
    pub fn new(image_url: impl Into<String>, voiceover_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            voiceover_url: voiceover_url.into(),
        }
    }

    /// Load an ordered JSON array of scene sources.
    pub fn load_list(path: &Path) -> ReelResult<Vec<Self>> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene list '{}'", path.display()))?;
        serde_json::from_str(&text)
            .map_err(|e| ReelError::validation(format!("parse scene list '{}': {e}", path.display())))
    }
}

/// One narrative unit: an image and its narration, at a fixed timeline position.
///
/// Immutable once created. The index is the 0-based position in script order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    index: usize,
    image_url: String,
    voiceover_url: String,
}

impl Scene {
    /// Index `sources` by position. The result is in timeline order.
    pub fn sequence(sources: impl IntoIterator<Item = SceneSource>) -> Vec<Self> {
        sources
            .into_iter()
            .enumerate()
            .map(|(index, src)| Self {
                index,
                image_url: src.image_url,
                voiceover_url: src.voiceover_url,
            })
            .collect()
    }

    /// Timeline position (0-based).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Remote image URL.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Remote voice-over URL.
    pub fn voiceover_url(&self) -> &str {
        &self.voiceover_url
    }

    /// Convert back into the serializable source form.
    pub fn to_source(&self) -> SceneSource {
        SceneSource::new(self.image_url.clone(), self.voiceover_url.clone())
    }
}
