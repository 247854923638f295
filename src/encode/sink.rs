use std::path::PathBuf;

use crate::clip::SceneClip;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::timeline::ClipPlacement;

/// Configuration provided to a [`TimelineSink`] before any clip is pushed.
#[derive(Clone, Debug, PartialEq)]
pub struct SinkConfig {
    /// Output canvas.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// ffmpeg video encoder name.
    pub video_codec: String,
    /// ffmpeg audio encoder name.
    pub audio_codec: String,
    /// Expected total length in seconds.
    pub total_secs: u64,
    /// Number of clips that will be pushed.
    pub clip_count: usize,
}

/// Sink contract for consuming clips in timeline order.
///
/// Ordering contract: `push_clip` is called once per clip, in strictly increasing scene order,
/// with contiguous placements.
pub trait TimelineSink: Send {
    /// Called once before any clip is pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Push one clip with its placement.
    fn push_clip(&mut self, placement: ClipPlacement, clip: &SceneClip) -> ReelResult<()>;
    /// Called once after the last clip. Returns where the output went, if anywhere.
    fn end(&mut self) -> ReelResult<Option<PathBuf>>;
}

/// What an [`InMemorySink`] saw for one clip.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedClip {
    /// Placement passed with the clip.
    pub placement: ClipPlacement,
    /// Clip display duration.
    pub display_secs: u32,
    /// Image path at push time.
    pub image_path: PathBuf,
    /// Audio path at push time.
    pub audio_path: PathBuf,
}

/// Sink that records pushed clips without encoding anything. Used by tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    clips: Vec<RecordedClip>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Recorded clips in push order.
    pub fn clips(&self) -> &[RecordedClip] {
        &self.clips
    }

    /// Whether `end` was reached.
    pub fn finished(&self) -> bool {
        self.finished
    }
}

impl TimelineSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.clips.clear();
        self.finished = false;
        Ok(())
    }

    fn push_clip(&mut self, placement: ClipPlacement, clip: &SceneClip) -> ReelResult<()> {
        if self.cfg.is_none() {
            return Err(ReelError::video_encode("in-memory sink not started"));
        }
        self.clips.push(RecordedClip {
            placement,
            display_secs: clip.display_secs(),
            image_path: clip.image().path().to_path_buf(),
            audio_path: clip.audio().path().to_path_buf(),
        });
        Ok(())
    }

    fn end(&mut self) -> ReelResult<Option<PathBuf>> {
        self.finished = true;
        Ok(None)
    }
}
