//! Run configuration.
//!
//! Precedence, lowest to highest: built-in defaults, a JSON file ([`ReelConfig::from_path`]),
//! `STORYREEL_*` environment variables ([`ReelConfig::apply_env`]), then explicit overrides made by
//! the caller (the CLI flags).

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "video.mp4";
/// Default output frame rate.
pub const DEFAULT_FPS: u32 = 24;
/// Default video codec (H.264 through libx264).
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
/// Default audio codec.
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
/// Default per-request transport timeout for asset downloads.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 120;

/// Settings for one video generation run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReelConfig {
    /// Final video path.
    pub output_path: PathBuf,
    /// Output frame rate (integer frames per second).
    pub fps: u32,
    /// ffmpeg video encoder name.
    pub video_codec: String,
    /// ffmpeg audio encoder name.
    pub audio_codec: String,
    /// Canvas width override. When unset the first scene's image decides the size.
    pub width: Option<u32>,
    /// Canvas height override. Must be set together with `width`.
    pub height: Option<u32>,
    /// Prepare scenes concurrently.
    pub parallel: bool,
    /// Worker threads for concurrent scene preparation. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Transport timeout for each asset download, in seconds.
    pub fetch_timeout_secs: u64,
    /// Directory under which per-run temporary storage is created. `None` uses the system
    /// temp dir.
    pub temp_root: Option<PathBuf>,
    /// Replace an existing file at `output_path`.
    pub overwrite: bool,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            fps: DEFAULT_FPS,
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            width: None,
            height: None,
            parallel: true,
            threads: None,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            temp_root: None,
            overwrite: true,
        }
    }
}

impl ReelConfig {
    /// Load a JSON config file. Missing keys keep their defaults.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ReelError::config(format!("read '{}': {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| ReelError::config(format!("parse '{}': {e}", path.display())))
    }

    /// Overlay `STORYREEL_*` variables from the process environment.
    pub fn apply_env(&mut self) -> ReelResult<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    pub(crate) fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> ReelResult<()> {
        if let Some(v) = var("STORYREEL_OUTPUT") {
            self.output_path = PathBuf::from(v);
        }
        if let Some(v) = var("STORYREEL_FPS") {
            self.fps = parse_var("STORYREEL_FPS", &v)?;
        }
        if let Some(v) = var("STORYREEL_CODEC") {
            self.video_codec = v;
        }
        if let Some(v) = var("STORYREEL_THREADS") {
            self.threads = Some(parse_var("STORYREEL_THREADS", &v)?);
        }
        if let Some(v) = var("STORYREEL_TEMP_ROOT") {
            self.temp_root = Some(PathBuf::from(v));
        }
        Ok(())
    }

    /// Check every field for values the pipeline cannot run with.
    pub fn validate(&self) -> ReelResult<()> {
        if self.output_path.as_os_str().is_empty() {
            return Err(ReelError::config("output_path must not be empty"));
        }
        if self.fps == 0 {
            return Err(ReelError::config("fps must be non-zero"));
        }
        if self.video_codec.trim().is_empty() {
            return Err(ReelError::config("video_codec must not be empty"));
        }
        if self.audio_codec.trim().is_empty() {
            return Err(ReelError::config("audio_codec must not be empty"));
        }
        if self.threads == Some(0) {
            return Err(ReelError::config("threads must be >= 1 when set"));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ReelError::config("fetch_timeout_secs must be non-zero"));
        }
        self.canvas()?;
        Ok(())
    }

    /// Validated output frame rate.
    pub fn frame_rate(&self) -> ReelResult<Fps> {
        Fps::new(self.fps, 1).map_err(|e| ReelError::config(e.to_string()))
    }

    /// Canvas override, if both dimensions are configured.
    pub fn canvas(&self) -> ReelResult<Option<Canvas>> {
        match (self.width, self.height) {
            (None, None) => Ok(None),
            (Some(width), Some(height)) => {
                let canvas = Canvas { width, height };
                canvas
                    .validate()
                    .map_err(|e| ReelError::config(e.to_string()))?;
                Ok(Some(canvas))
            }
            _ => Err(ReelError::config(
                "width and height must be configured together",
            )),
        }
    }

    /// Transport timeout for asset downloads.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> ReelResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ReelError::config(format!("{key}='{value}': {e}")))
}

/// Credentials and endpoints for the external script, image, and voice services.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// OpenAI API key (`OPENAI_API_KEY`).
    pub openai_api_key: String,
    /// OpenAI API base URL (`OPENAI_BASE_URL`).
    pub openai_base_url: String,
    /// Model used to write the script.
    pub script_model: String,
    /// Model used to generate scene images.
    pub image_model: String,
    /// Murf API key (`MURF_API_KEY`).
    pub murf_api_key: String,
    /// Murf API base URL (`MURF_BASE_URL`).
    pub murf_base_url: String,
    /// Request timeout for service calls.
    pub timeout: Duration,
}

impl ServiceConfig {
    /// Default OpenAI endpoint.
    pub const OPENAI_BASE_URL: &'static str = "https://api.openai.com/v1";
    /// Default Murf endpoint.
    pub const MURF_BASE_URL: &'static str = "https://api.murf.ai/v1";

    /// Read service settings from the process environment.
    pub fn from_env() -> ReelResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_vars(var: impl Fn(&str) -> Option<String>) -> ReelResult<Self> {
        let required = |key: &str| {
            var(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ReelError::config(format!("{key} is not set")))
        };
        Ok(Self {
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_base_url: var("OPENAI_BASE_URL")
                .unwrap_or_else(|| Self::OPENAI_BASE_URL.to_string()),
            script_model: var("STORYREEL_SCRIPT_MODEL").unwrap_or_else(|| "gpt-4o".to_string()),
            image_model: var("STORYREEL_IMAGE_MODEL").unwrap_or_else(|| "dall-e-3".to_string()),
            murf_api_key: required("MURF_API_KEY")?,
            murf_base_url: var("MURF_BASE_URL").unwrap_or_else(|| Self::MURF_BASE_URL.to_string()),
            timeout: Duration::from_secs(300),
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
