use std::path::Path;
use std::process::{Command, Stdio};

use crate::foundation::error::{ReelError, ReelResult};

/// Decoded facts about an audio asset.
///
/// The duration is always finite and non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioInfo {
    duration_secs: f64,
}

impl AudioInfo {
    /// Validate a decoder-reported duration in seconds.
    pub fn new(duration_secs: f64) -> ReelResult<Self> {
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            return Err(ReelError::validation(format!(
                "audio duration must be finite and >= 0, got {duration_secs}"
            )));
        }
        Ok(Self { duration_secs })
    }

    /// Duration in (fractional) seconds.
    pub fn duration_secs(self) -> f64 {
        self.duration_secs
    }
}

/// Decoded facts about a still image asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Inspects materialized media files.
///
/// Failures are reported as [`ReelError::AssetDecode`].
pub trait MediaProbe: Send + Sync {
    /// Decode the audio header of `path`.
    fn probe_audio(&self, path: &Path) -> ReelResult<AudioInfo>;
    /// Decode the image header of `path`.
    fn probe_image(&self, path: &Path) -> ReelResult<ImageInfo>;
}

/// Probe that shells out to `ffprobe` for audio and uses the `image` crate for stills.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfprobeProbe;

impl MediaProbe for FfprobeProbe {
    fn probe_audio(&self, path: &Path) -> ReelResult<AudioInfo> {
        ffprobe_audio("ffprobe", path)
    }

    fn probe_image(&self, path: &Path) -> ReelResult<ImageInfo> {
        let (width, height) = image::ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| ReelError::asset_decode(path, e))?
            .into_dimensions()
            .map_err(|e| ReelError::asset_decode(path, e))?;
        if width == 0 || height == 0 {
            return Err(ReelError::asset_decode(path, "image has zero size"));
        }
        Ok(ImageInfo { width, height })
    }
}

/// Read the narration length of `path` with the ffprobe binary `program`.
///
/// Failing to spawn `program` is a [`ReelError::Config`]; everything else is a decode error.
fn ffprobe_audio(program: &str, path: &Path) -> ReelResult<AudioInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        #[serde(default)]
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let out = Command::new(program)
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            ReelError::config(format!(
                "ffprobe is required to read narration length, but '{program}' could not be run: {e}"
            ))
        })?;
    if !out.status.success() {
        return Err(ReelError::asset_decode(
            path,
            format!(
                "ffprobe failed: {}",
                String::from_utf8_lossy(&out.stderr).trim()
            ),
        ));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| ReelError::asset_decode(path, format!("ffprobe json parse failed: {e}")))?;
    let audio_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"))
        .ok_or_else(|| ReelError::asset_decode(path, "no audio stream found"))?;

    // Container duration first; some raw streams only report it per stream.
    let duration = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .or(audio_stream.duration.as_deref())
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| ReelError::asset_decode(path, "ffprobe reported no duration"))?;

    AudioInfo::new(duration).map_err(|e| ReelError::asset_decode(path, e))
}

/// Return `true` when both `ffmpeg` and `ffprobe` can be invoked from `PATH`.
pub fn ffmpeg_tools_available() -> bool {
    ["ffmpeg", "ffprobe"].iter().all(|tool| {
        Command::new(tool)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
