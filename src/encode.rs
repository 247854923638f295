//! Export of an assembled timeline to a video file.
//!
//! [`VideoExporter`](export::VideoExporter) walks the timeline once and feeds every clip, in
//! order, into a [`TimelineSink`](sink::TimelineSink). [`FfmpegSink`](ffmpeg::FfmpegSink) turns
//! the clips into an MP4 with the system `ffmpeg`; [`InMemorySink`](sink::InMemorySink) only
//! records what it was given.

/// Exporter driving a sink over a timeline.
pub mod export;
/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Sink trait and built-in sinks.
pub mod sink;
