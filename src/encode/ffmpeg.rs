use std::ffi::OsString;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::clip::SceneClip;
use crate::encode::sink::{SinkConfig, TimelineSink};
use crate::foundation::error::{ReelError, ReelResult};
use crate::timeline::ClipPlacement;

/// Sample rate every narration track is resampled to before concatenation.
pub const MIX_SAMPLE_RATE: u32 = 48_000;

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    /// Create options for outputting an MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct ClipInput {
    image: PathBuf,
    audio: PathBuf,
    secs: u32,
}

/// Sink that encodes the whole timeline with a single system `ffmpeg` run.
///
/// Each clip contributes a looped still-image input and a narration input. Images are scaled
/// and letterboxed to the canvas; narration is padded with silence and cut to the clip length;
/// all pairs are joined with the `concat` filter. Output goes to a staging file next to
/// `out_path` and is renamed into place only after `ffmpeg` succeeds.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    cfg: Option<SinkConfig>,
    inputs: Vec<ClipInput>,
    last_scene: Option<usize>,
}

impl FfmpegSink {
    /// Create a new sink writing to `opts.out_path`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            cfg: None,
            inputs: Vec::new(),
            last_scene: None,
        }
    }
}

impl TimelineSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        cfg.canvas
            .validate()
            .map_err(|e| ReelError::video_encode(e.to_string()))?;
        if cfg.video_codec.trim().is_empty() || cfg.audio_codec.trim().is_empty() {
            return Err(ReelError::video_encode("codec names must not be empty"));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(ReelError::video_encode(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(ReelError::video_encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        self.inputs = Vec::with_capacity(cfg.clip_count);
        self.cfg = Some(cfg);
        self.last_scene = None;
        Ok(())
    }

    fn push_clip(&mut self, placement: ClipPlacement, clip: &SceneClip) -> ReelResult<()> {
        if self.cfg.is_none() {
            return Err(ReelError::video_encode("ffmpeg sink not started"));
        }
        if let Some(last) = self.last_scene
            && placement.scene <= last
        {
            return Err(ReelError::video_encode(
                "ffmpeg sink received out-of-order clip",
            ));
        }
        self.last_scene = Some(placement.scene);

        self.inputs.push(ClipInput {
            image: clip.image().path().to_path_buf(),
            audio: clip.audio().path().to_path_buf(),
            secs: clip.display_secs(),
        });
        Ok(())
    }

    fn end(&mut self) -> ReelResult<Option<PathBuf>> {
        let cfg = self
            .cfg
            .take()
            .ok_or_else(|| ReelError::video_encode("ffmpeg sink not started"))?;
        let inputs = std::mem::take(&mut self.inputs);
        if inputs.is_empty() {
            return Err(ReelError::EmptyTimeline);
        }

        let staging = StagingFile(Some(staging_path(&self.opts.out_path)));
        let staging_path = staging.path().to_path_buf();
        let args = ffmpeg_args(&cfg, &inputs, &staging_path);
        debug!(clips = inputs.len(), ?args, "spawning ffmpeg");

        let out = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                ReelError::video_encode(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(ReelError::video_encode(format!(
                "ffmpeg exited with status {}: {}",
                out.status,
                stderr.trim()
            )));
        }

        std::fs::rename(&staging_path, &self.opts.out_path).map_err(|e| {
            ReelError::video_encode(format!(
                "failed to move '{}' to '{}': {e}",
                staging_path.display(),
                self.opts.out_path.display()
            ))
        })?;
        staging.disarm();

        info!(path = %self.opts.out_path.display(), total_secs = cfg.total_secs, "video written");
        Ok(Some(self.opts.out_path.clone()))
    }
}

/// Removes a half-written encode unless disarmed.
struct StagingFile(Option<PathBuf>);

impl StagingFile {
    fn path(&self) -> &Path {
        self.0.as_deref().unwrap_or(Path::new(""))
    }

    fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for StagingFile {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

fn staging_path(out_path: &Path) -> PathBuf {
    let name = out_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video.mp4".to_string());
    out_path.with_file_name(format!(".{name}.partial"))
}

fn ffmpeg_args(cfg: &SinkConfig, inputs: &[ClipInput], out_path: &Path) -> Vec<OsString> {
    let rate = cfg.fps.ffmpeg_rate();
    let mut args: Vec<OsString> = ["-y", "-nostdin", "-loglevel", "error"]
        .into_iter()
        .map(OsString::from)
        .collect();

    for input in inputs {
        args.extend(
            [
                "-loop".to_string(),
                "1".to_string(),
                "-framerate".to_string(),
                rate.clone(),
                "-t".to_string(),
                input.secs.to_string(),
                "-i".to_string(),
            ]
            .map(OsString::from),
        );
        args.push(input.image.clone().into_os_string());
        args.push("-i".into());
        args.push(input.audio.clone().into_os_string());
    }

    args.push("-filter_complex".into());
    args.push(filter_graph(cfg, inputs).into());
    args.extend(
        [
            "-map",
            "[outv]",
            "-map",
            "[outa]",
            "-c:v",
            cfg.video_codec.as_str(),
            "-pix_fmt",
            "yuv420p",
            "-r",
            rate.as_str(),
            "-c:a",
            cfg.audio_codec.as_str(),
            "-movflags",
            "+faststart",
            "-f",
            "mp4",
        ]
        .map(OsString::from),
    );
    args.push(out_path.as_os_str().to_owned());
    args
}

fn filter_graph(cfg: &SinkConfig, inputs: &[ClipInput]) -> String {
    let (w, h) = (cfg.canvas.width, cfg.canvas.height);
    let rate = cfg.fps.ffmpeg_rate();
    let mut graph = String::new();
    for (i, input) in inputs.iter().enumerate() {
        let (vi, ai, secs) = (2 * i, 2 * i + 1, input.secs);
        let _ = write!(
            graph,
            "[{vi}:v]scale={w}:{h}:force_original_aspect_ratio=decrease,\
             pad={w}:{h}:(ow-iw)/2:(oh-ih)/2:color=black,setsar=1,fps={rate},format=yuv420p,\
             trim=duration={secs},setpts=PTS-STARTPTS[v{i}];\
             [{ai}:a]aformat=sample_rates={MIX_SAMPLE_RATE}:channel_layouts=stereo,apad,\
             atrim=duration={secs},asetpts=PTS-STARTPTS[a{i}];"
        );
    }
    for i in 0..inputs.len() {
        let _ = write!(graph, "[v{i}][a{i}]");
    }
    let _ = write!(graph, "concat=n={}:v=1:a=1[outv][outa]", inputs.len());
    graph
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
