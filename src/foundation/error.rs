use std::fmt;
use std::path::PathBuf;

/// Convenience result type used across storyreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Optional scene index attached to asset errors once the failing scene is known.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneTag(pub Option<usize>);

impl fmt::Display for SceneTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(idx) => write!(f, " (scene {idx})"),
            None => Ok(()),
        }
    }
}

/// Top-level error taxonomy for a video generation run.
///
/// None of these are recovered locally: each one aborts the whole run.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Network or storage failure while materializing a remote asset.
    #[error("asset fetch error{scene}: '{url}': {reason}")]
    AssetFetch {
        /// Scene that owned the asset, when known.
        scene: SceneTag,
        /// Remote URL that failed.
        url: String,
        /// Underlying cause.
        reason: String,
    },

    /// A fetched file is not valid or decodable media.
    #[error("asset decode error{scene}: '{}': {reason}", path.display())]
    AssetDecode {
        /// Scene that owned the asset, when known.
        scene: SceneTag,
        /// Local file that failed to decode.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// Assembly was attempted with no clips.
    #[error("empty timeline: at least one scene is required")]
    EmptyTimeline,

    /// Failure while encoding the final video.
    #[error("video encode error: {0}")]
    VideoEncode(String),

    /// Invalid caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// An external collaborator (script, image, or voice service) failed.
    #[error("service error: {0}")]
    Service(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::AssetFetch`] value without a scene tag.
    pub fn asset_fetch(url: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::AssetFetch {
            scene: SceneTag::default(),
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`ReelError::AssetDecode`] value without a scene tag.
    pub fn asset_decode(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::AssetDecode {
            scene: SceneTag::default(),
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`ReelError::VideoEncode`] value.
    pub fn video_encode(msg: impl Into<String>) -> Self {
        Self::VideoEncode(msg.into())
    }

    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ReelError::Service`] value.
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    /// Attach the owning scene index to asset errors. Other variants pass through unchanged.
    pub fn with_scene(self, index: usize) -> Self {
        match self {
            Self::AssetFetch { url, reason, .. } => Self::AssetFetch {
                scene: SceneTag(Some(index)),
                url,
                reason,
            },
            Self::AssetDecode { path, reason, .. } => Self::AssetDecode {
                scene: SceneTag(Some(index)),
                path,
                reason,
            },
            other => other,
        }
    }

    /// Scene index the error belongs to, if any.
    pub fn scene(&self) -> Option<usize> {
        match self {
            Self::AssetFetch { scene, .. } | Self::AssetDecode { scene, .. } => scene.0,
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
