use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::assets::fetch::AssetFetcher;
use crate::foundation::error::{ReelError, ReelResult};

/// What a materialized file holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Still image shown for the whole scene.
    Image,
    /// Voice-over narration.
    Audio,
}

impl AssetKind {
    /// Local file name used for this kind of asset in scene `index`.
    pub fn file_name(self, index: usize) -> String {
        match self {
            Self::Image => format!("scene_{index}.png"),
            Self::Audio => format!("scene_{index}.wav"),
        }
    }
}

/// Local byte-for-byte copy of a remote resource.
///
/// The file lives inside the [`SceneWorkspace`] of its scene and disappears with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterializedAsset {
    kind: AssetKind,
    path: PathBuf,
    scene: usize,
}

impl MaterializedAsset {
    /// Asset kind.
    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Local file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Owning scene index.
    pub fn scene(&self) -> usize {
        self.scene
    }
}

/// Temporary storage root owned by one run.
///
/// Everything created beneath it is deleted when the value is dropped, whether the run
/// succeeded or not.
#[derive(Debug)]
pub struct RunWorkspace {
    root: TempDir,
}

impl RunWorkspace {
    /// Create a fresh run directory under `parent`, or under the system temp dir.
    pub fn create(parent: Option<&Path>) -> ReelResult<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("storyreel-run-");
        let root = match parent {
            Some(parent) => {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ReelError::config(format!("create temp root '{}': {e}", parent.display()))
                })?;
                builder.tempdir_in(parent)
            }
            None => builder.tempdir(),
        }
        .map_err(|e| ReelError::config(format!("create run workspace: {e}")))?;
        debug!(path = %root.path().display(), "run workspace created");
        Ok(Self { root })
    }

    /// Run directory path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Acquire exclusive storage for scene `index`.
    pub fn scene(&self, index: usize) -> ReelResult<SceneWorkspace> {
        let dir = tempfile::Builder::new()
            .prefix(&format!("scene-{index}-"))
            .tempdir_in(self.root.path())
            .map_err(|e| ReelError::config(format!("create scene {index} workspace: {e}")))?;
        Ok(SceneWorkspace { index, dir })
    }
}

/// Exclusive temporary storage for one scene's assets.
///
/// Never shared between scenes. Dropping it deletes every asset materialized into it.
#[derive(Debug)]
pub struct SceneWorkspace {
    index: usize,
    dir: TempDir,
}

impl SceneWorkspace {
    /// Scene that owns this storage.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Download `url` into this workspace as the scene's `kind` asset.
    pub fn materialize(
        &self,
        fetcher: &dyn AssetFetcher,
        kind: AssetKind,
        url: &str,
    ) -> ReelResult<MaterializedAsset> {
        let path = self.dir.path().join(kind.file_name(self.index));
        fetcher
            .fetch(url, &path)
            .map_err(|e| e.with_scene(self.index))?;
        let asset = MaterializedAsset {
            kind,
            path,
            scene: self.index,
        };
        debug!(
            scene = asset.scene(),
            kind = ?asset.kind(),
            path = %asset.path().display(),
            "asset materialized"
        );
        Ok(asset)
    }
}

/// Both assets of one scene plus the storage that holds them.
#[derive(Debug)]
pub struct SceneAssets {
    pub(crate) workspace: SceneWorkspace,
    pub(crate) image: MaterializedAsset,
    pub(crate) audio: MaterializedAsset,
}

impl SceneAssets {
    /// Fetch the image and the voice-over of scene `index` into `workspace`.
    pub fn fetch(
        workspace: SceneWorkspace,
        fetcher: &dyn AssetFetcher,
        image_url: &str,
        voiceover_url: &str,
    ) -> ReelResult<Self> {
        let image = workspace.materialize(fetcher, AssetKind::Image, image_url)?;
        let audio = workspace.materialize(fetcher, AssetKind::Audio, voiceover_url)?;
        Ok(Self {
            workspace,
            image,
            audio,
        })
    }

    /// Scene index.
    pub fn index(&self) -> usize {
        self.workspace.index()
    }

    /// Image asset.
    pub fn image(&self) -> &MaterializedAsset {
        &self.image
    }

    /// Audio asset.
    pub fn audio(&self) -> &MaterializedAsset {
        &self.audio
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/workspace.rs"]
mod tests;
