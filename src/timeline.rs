//! Timeline assembly: pure sequencing of scene clips.

use crate::clip::SceneClip;
use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};

/// Where one clip sits on the timeline, in whole seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ClipPlacement {
    /// Scene index of the clip.
    pub scene: usize,
    /// Inclusive start.
    pub start_secs: u64,
    /// Exclusive end.
    pub end_secs: u64,
}

impl ClipPlacement {
    /// Placement length in seconds.
    pub fn len_secs(self) -> u64 {
        self.end_secs - self.start_secs
    }
}

/// Ordered concatenation of every clip of a run.
///
/// Clips play back to back in scene order: no gaps, no overlaps, no transitions.
#[derive(Debug)]
pub struct Timeline {
    clips: Vec<SceneClip>,
    placements: Vec<ClipPlacement>,
}

impl Timeline {
    /// Concatenate `clips` in the given order.
    ///
    /// Fails with [`ReelError::EmptyTimeline`] for an empty list, and with a validation error
    /// when scene indices are not strictly increasing. Clips are never reordered or deduplicated.
    pub fn assemble(clips: Vec<SceneClip>) -> ReelResult<Self> {
        if clips.is_empty() {
            return Err(ReelError::EmptyTimeline);
        }

        let mut placements = Vec::with_capacity(clips.len());
        let mut cursor = 0u64;
        let mut prev: Option<usize> = None;
        for clip in &clips {
            if let Some(p) = prev
                && clip.index() <= p
            {
                return Err(ReelError::validation(format!(
                    "timeline clips must be in strictly increasing scene order (scene {} after {p})",
                    clip.index()
                )));
            }
            prev = Some(clip.index());

            let end = cursor + u64::from(clip.display_secs());
            placements.push(ClipPlacement {
                scene: clip.index(),
                start_secs: cursor,
                end_secs: end,
            });
            cursor = end;
        }

        Ok(Self { clips, placements })
    }

    /// Number of clips.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Always `false` for an assembled timeline.
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Clips in playback order.
    pub fn clips(&self) -> &[SceneClip] {
        &self.clips
    }

    /// Placement of each clip, parallel to [`Timeline::clips`].
    pub fn placements(&self) -> &[ClipPlacement] {
        &self.placements
    }

    /// Sum of all clip display durations.
    pub fn total_secs(&self) -> u64 {
        self.placements.last().map(|p| p.end_secs).unwrap_or(0)
    }

    /// Total length in frames at `fps`.
    pub fn duration_frames(&self, fps: Fps) -> u64 {
        fps.frames_for_secs(self.total_secs())
    }

    /// Iterate `(placement, clip)` pairs in playback order.
    pub fn iter(&self) -> impl Iterator<Item = (&ClipPlacement, &SceneClip)> {
        self.placements.iter().zip(self.clips.iter())
    }
}

#[cfg(test)]
#[path = "../tests/unit/timeline.rs"]
mod tests;
