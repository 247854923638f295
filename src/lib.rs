//! storyreel turns narrated scenes into a slideshow video.
//!
//! Each scene is a remote still image plus a remote voice-over. A run:
//!
//! - Fetches both assets of every scene into scoped temporary storage
//! - Holds each image for `floor(narration length) + 1` seconds
//! - Concatenates the clips in scene order and encodes one MP4 via [`TimelineSink`]
//!
//! [`generate_video`] wires the production collaborators together; [`Pipeline`] accepts any
//! [`AssetFetcher`], [`MediaProbe`], and [`TimelineSink`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod clip;
mod foundation;

/// Run configuration and service credentials.
pub mod config;
/// Video export sinks.
pub mod encode;
/// Run driver and state machine.
pub mod pipeline;
/// Boundary scene model.
pub mod scene;
/// Script, image, and voice service clients.
pub mod services;
/// Prompt to scene list.
pub mod storyboard;
/// Ordered clip concatenation.
pub mod timeline;

#[cfg(test)]
mod test_support;

pub use crate::foundation::core::{Canvas, Fps};
pub use crate::foundation::error::{ReelError, ReelResult, SceneTag};

pub use crate::assets::fetch::{AssetFetcher, HttpFetcher};
pub use crate::assets::media::{
    AudioInfo, FfprobeProbe, ImageInfo, MediaProbe, ffmpeg_tools_available,
};
pub use crate::assets::workspace::{
    AssetKind, MaterializedAsset, RunWorkspace, SceneAssets, SceneWorkspace,
};
pub use crate::clip::builder::ClipBuilder;
pub use crate::clip::duration::resolve_display_secs;
pub use crate::clip::{ClipSummary, SceneClip};
pub use crate::config::{ReelConfig, ServiceConfig};
pub use crate::encode::export::{ExportSummary, VideoExporter};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::sink::{InMemorySink, RecordedClip, SinkConfig, TimelineSink};
pub use crate::pipeline::{Pipeline, RunReport, RunState, generate_video};
pub use crate::scene::{Scene, SceneSource};
pub use crate::services::{
    ImageGenerator, MurfClient, OpenAiClient, Script, ScriptScene, ScriptSource,
    VoiceSynthesizer,
};
pub use crate::storyboard::build_storyboard;
pub use crate::timeline::{ClipPlacement, Timeline};
