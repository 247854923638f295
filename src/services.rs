//! Collaborator services that turn a prompt into scene assets.
//!
//! The pipeline itself only needs URLs. These clients produce them: a script writer splits the
//! prompt into narrated scenes, an image generator draws each scene, and a voice synthesizer
//! reads each line.

pub(crate) mod murf;
pub(crate) mod openai;

use crate::foundation::error::{ReelError, ReelResult};

/// One narrated scene of a generated script.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScriptScene {
    /// Sentence read by the narrator.
    pub text: String,
    /// Prompt for the scene's still image.
    pub image: String,
    /// Voice id for the narrator.
    pub voice: String,
}

/// Ordered script. Scene order is video order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    /// Scenes in playback order.
    pub scenes: Vec<ScriptScene>,
}

/// Writes a script for a user prompt.
pub trait ScriptSource: Send + Sync {
    /// Split `prompt` into narrated scenes.
    fn generate_script(&self, prompt: &str) -> ReelResult<Script>;
}

/// Produces a still image for a prompt.
pub trait ImageGenerator: Send + Sync {
    /// Return a URL of an image matching `prompt`.
    fn generate_image(&self, prompt: &str) -> ReelResult<String>;
}

/// Reads text aloud.
pub trait VoiceSynthesizer: Send + Sync {
    /// Return a URL of `text` spoken with `voice`.
    fn synthesize(&self, voice: &str, text: &str) -> ReelResult<String>;
}

pub use murf::MurfClient;
pub use openai::OpenAiClient;

/// Turn a failed HTTP exchange into a service error naming `what`.
pub(crate) fn check_status(
    what: &str,
    response: reqwest::blocking::Response,
) -> ReelResult<reqwest::blocking::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ReelError::service(format!(
        "{what} failed with HTTP status {status}: {}",
        body.trim()
    )))
}

pub(crate) fn http_client(timeout: std::time::Duration) -> ReelResult<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("storyreel/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| ReelError::config(format!("failed to build HTTP client: {e}")))
}
