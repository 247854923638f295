use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::config::ServiceConfig;
use crate::foundation::error::{ReelError, ReelResult};
use crate::services::{ImageGenerator, Script, ScriptSource, check_status, http_client};

const SCRIPT_INSTRUCTIONS: &str = "\
You write scripts for short narrated slideshow videos. Turn the user's prompt into a script \
with one scene per sentence, returned as a JSON object with a `scenes` array.

Each scene has:

* text: the sentence the narrator reads.

* image: a prompt for an image model describing a photorealistic picture that fits this \
sentence and the video as a whole. The picture should contain little or no text.

* voice: the narrator's voice id. Use the same voice for every scene. Documentaries use \
en-UK-gabriel. Promotional, advert-style, or cheerful videos use en-UK-reggie for a British \
accent or en-US-caleb for an American one. Tutorials and lessons use en-UK-hazel or \
en-US-miles. Anything else uses en-US-miles.
";

/// OpenAI client for script writing (Responses API) and scene images (Images API).
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
    script_model: String,
    image_model: String,
}

impl OpenAiClient {
    /// Client configured from `cfg`.
    pub fn new(cfg: &ServiceConfig) -> ReelResult<Self> {
        Ok(Self {
            client: http_client(cfg.timeout)?,
            api_key: cfg.openai_api_key.clone(),
            base_url: cfg.openai_base_url.trim_end_matches('/').to_string(),
            script_model: cfg.script_model.clone(),
            image_model: cfg.image_model.clone(),
        })
    }

    fn post(&self, what: &str, path: &str, body: &Value) -> ReelResult<Value> {
        let response = self
            .client
            .post(format!("{}/{path}", self.base_url))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .map_err(|e| ReelError::service(format!("{what} request failed: {e}")))?;
        check_status(what, response)?
            .json()
            .map_err(|e| ReelError::service(format!("{what} returned invalid JSON: {e}")))
    }
}

impl ScriptSource for OpenAiClient {
    fn generate_script(&self, prompt: &str) -> ReelResult<Script> {
        info!(model = %self.script_model, "requesting script");
        let body = script_request(&self.script_model, prompt);
        let response = self.post("script generation", "responses", &body)?;
        let script = parse_script_response(&response)?;
        info!(scenes = script.scenes.len(), "script received");
        Ok(script)
    }
}

impl ImageGenerator for OpenAiClient {
    fn generate_image(&self, prompt: &str) -> ReelResult<String> {
        debug!(model = %self.image_model, prompt, "requesting image");
        let body = image_request(&self.image_model, prompt);
        let response = self.post("image generation", "images/generations", &body)?;
        parse_image_response(&response)
    }
}

fn script_request(model: &str, prompt: &str) -> Value {
    json!({
        "model": model,
        "input": [
            { "role": "system", "content": SCRIPT_INSTRUCTIONS },
            { "role": "user", "content": prompt },
        ],
        "text": {
            "format": {
                "type": "json_schema",
                "name": "script",
                "strict": true,
                "schema": {
                    "type": "object",
                    "properties": {
                        "scenes": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "text": { "type": "string" },
                                    "image": { "type": "string" },
                                    "voice": { "type": "string" },
                                },
                                "required": ["text", "image", "voice"],
                                "additionalProperties": false,
                            },
                        },
                    },
                    "required": ["scenes"],
                    "additionalProperties": false,
                },
            },
        },
    })
}

fn image_request(model: &str, prompt: &str) -> Value {
    json!({
        "model": model,
        "prompt": prompt,
        "size": "1024x1024",
        "quality": "standard",
        "n": 1,
    })
}

#[derive(Debug, Deserialize)]
struct ResponsesOutput {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

fn parse_script_response(response: &Value) -> ReelResult<Script> {
    let parsed = ResponsesOutput::deserialize(response)
        .map_err(|e| ReelError::service(format!("unexpected script response shape: {e}")))?;
    let text: String = parsed
        .output
        .iter()
        .flat_map(|item| item.content.iter())
        .filter(|c| c.kind == "output_text")
        .filter_map(|c| c.text.as_deref())
        .collect();
    if text.trim().is_empty() {
        return Err(ReelError::service("script response contained no output text"));
    }
    serde_json::from_str(&text)
        .map_err(|e| ReelError::service(format!("script is not valid scene JSON: {e}")))
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

fn parse_image_response(response: &Value) -> ReelResult<String> {
    let parsed = ImagesResponse::deserialize(response)
        .map_err(|e| ReelError::service(format!("unexpected image response shape: {e}")))?;
    parsed
        .data
        .into_iter()
        .next()
        .and_then(|d| d.url)
        .ok_or_else(|| ReelError::service("image response contained no URL"))
}

#[cfg(test)]
#[path = "../../tests/unit/services/openai.rs"]
mod tests;
