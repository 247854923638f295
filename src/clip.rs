//! Scene clips: one still image held for the length of its narration.

pub(crate) mod builder;
pub(crate) mod duration;

use crate::assets::media::{AudioInfo, ImageInfo};
use crate::assets::workspace::{MaterializedAsset, SceneWorkspace};

/// A self-contained audio-visual segment for one scene.
///
/// Invariant: `display_secs == floor(audio duration) + 1`. The clip owns its scene's
/// temporary storage, so the files it references stay on disk until the clip is dropped.
#[derive(Debug)]
pub struct SceneClip {
    index: usize,
    image: MaterializedAsset,
    audio: MaterializedAsset,
    image_info: ImageInfo,
    audio_info: AudioInfo,
    display_secs: u32,
    _workspace: SceneWorkspace,
}

impl SceneClip {
    /// Scene index (timeline position).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Still image shown for the whole clip.
    pub fn image(&self) -> &MaterializedAsset {
        &self.image
    }

    /// Narration track.
    pub fn audio(&self) -> &MaterializedAsset {
        &self.audio
    }

    /// Probed image size.
    pub fn image_info(&self) -> ImageInfo {
        self.image_info
    }

    /// Probed narration length in seconds.
    pub fn audio_secs(&self) -> f64 {
        self.audio_info.duration_secs()
    }

    /// Playable length of the clip in whole seconds (always >= 1).
    pub fn display_secs(&self) -> u32 {
        self.display_secs
    }

    /// Lightweight summary for reporting.
    pub fn summary(&self) -> ClipSummary {
        ClipSummary {
            index: self.index,
            audio_secs: self.audio_secs(),
            display_secs: self.display_secs,
        }
    }
}

/// Reportable facts about a built clip.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ClipSummary {
    /// Scene index.
    pub index: usize,
    /// Probed narration length in seconds.
    pub audio_secs: f64,
    /// Display duration in seconds.
    pub display_secs: u32,
}
