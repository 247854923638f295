use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::config::ServiceConfig;
use crate::foundation::error::{ReelError, ReelResult};
use crate::services::{VoiceSynthesizer, check_status, http_client};

/// Murf text-to-speech client.
#[derive(Clone, Debug)]
pub struct MurfClient {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

impl MurfClient {
    /// Client configured from `cfg`.
    pub fn new(cfg: &ServiceConfig) -> ReelResult<Self> {
        Ok(Self {
            client: http_client(cfg.timeout)?,
            api_key: cfg.murf_api_key.clone(),
            base_url: cfg.murf_base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl VoiceSynthesizer for MurfClient {
    fn synthesize(&self, voice: &str, text: &str) -> ReelResult<String> {
        debug!(voice, chars = text.len(), "requesting voice-over");
        let response = self
            .client
            .post(format!("{}/speech/generate", self.base_url))
            .header("api-key", &self.api_key)
            .json(&speech_request(voice, text))
            .send()
            .map_err(|e| ReelError::service(format!("voice synthesis request failed: {e}")))?;
        let body: Value = check_status("voice synthesis", response)?
            .json()
            .map_err(|e| ReelError::service(format!("voice synthesis returned invalid JSON: {e}")))?;
        parse_speech_response(&body)
    }
}

fn speech_request(voice: &str, text: &str) -> Value {
    json!({ "text": text, "voiceId": voice })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpeechResponse {
    audio_file: Option<String>,
}

fn parse_speech_response(body: &Value) -> ReelResult<String> {
    SpeechResponse::deserialize(body)
        .map_err(|e| ReelError::service(format!("unexpected voice response shape: {e}")))?
        .audio_file
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ReelError::service("voice response contained no audioFile"))
}

#[cfg(test)]
#[path = "../../tests/unit/services/murf.rs"]
mod tests;
