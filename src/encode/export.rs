use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::ReelConfig;
use crate::encode::sink::{SinkConfig, TimelineSink};
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::timeline::Timeline;

/// What an export produced.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ExportSummary {
    /// Where the sink wrote the video, if it wrote one.
    pub output_path: Option<PathBuf>,
    /// Canvas the clips were fitted to.
    pub canvas: Canvas,
    /// Total playable length in seconds.
    pub total_secs: u64,
    /// Total length in frames at the configured rate.
    pub total_frames: u64,
    /// Number of clips exported.
    pub clip_count: usize,
}

/// Encodes a [`Timeline`] through a [`TimelineSink`].
#[derive(Clone, Debug)]
pub struct VideoExporter<'a> {
    config: &'a ReelConfig,
}

impl<'a> VideoExporter<'a> {
    /// Exporter using `config` for frame rate, codecs, and canvas override.
    pub fn new(config: &'a ReelConfig) -> Self {
        Self { config }
    }

    /// Canvas for `timeline`: the configured override, else the first clip's image size
    /// rounded down to even dimensions.
    pub fn resolve_canvas(&self, timeline: &Timeline) -> ReelResult<Canvas> {
        if let Some(canvas) = self.config.canvas()? {
            return Ok(canvas);
        }
        let first = timeline.clips().first().ok_or(ReelError::EmptyTimeline)?;
        let info = first.image_info();
        Ok(Canvas::from_image_size(info.width, info.height))
    }

    /// Push every clip of `timeline`, in order, into `sink`.
    ///
    /// Consumes the timeline: once the sink is done, the clips and their scene storage are
    /// dropped. Sink failures surface as [`ReelError::VideoEncode`].
    #[tracing::instrument(skip_all, fields(clips = timeline.len()))]
    pub fn export(
        &self,
        timeline: Timeline,
        sink: &mut dyn TimelineSink,
    ) -> ReelResult<ExportSummary> {
        if timeline.is_empty() {
            return Err(ReelError::EmptyTimeline);
        }
        let fps = self.config.frame_rate()?;
        let canvas = self.resolve_canvas(&timeline)?;
        let total_secs = timeline.total_secs();

        sink.begin(SinkConfig {
            canvas,
            fps,
            video_codec: self.config.video_codec.clone(),
            audio_codec: self.config.audio_codec.clone(),
            total_secs,
            clip_count: timeline.len(),
        })
        .map_err(as_encode_error)?;

        for (placement, clip) in timeline.iter() {
            debug!(
                scene = placement.scene,
                start = placement.start_secs,
                end = placement.end_secs,
                "push clip"
            );
            sink.push_clip(*placement, clip).map_err(as_encode_error)?;
        }

        let output_path = sink.end().map_err(as_encode_error)?;
        let summary = ExportSummary {
            output_path,
            canvas,
            total_secs,
            total_frames: timeline.duration_frames(fps),
            clip_count: timeline.len(),
        };
        drop(timeline);

        info!(
            total_secs,
            frames = summary.total_frames,
            width = canvas.width,
            height = canvas.height,
            "timeline exported"
        );
        Ok(summary)
    }
}

fn as_encode_error(err: ReelError) -> ReelError {
    match err {
        ReelError::VideoEncode(_) | ReelError::EmptyTimeline => err,
        other => ReelError::video_encode(other.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/export.rs"]
mod tests;
