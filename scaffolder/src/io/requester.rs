//! Backend abstraction for requesting folder-structure proposals.
//!
//! The [`ProposalRequester`] trait decouples the pipeline from the actual
//! generation backend (currently an OpenAI-compatible chat-completions API).
//! Tests use scripted requesters that return canned payloads without any
//! network access.

use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::io::config::AppConfig;

/// Abstraction over generation backends.
pub trait ProposalRequester {
    /// Send `prompt` once and return the raw structured-data response text.
    fn request(&self, prompt: &str) -> Result<String>;
}

/// Requester for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Debug)]
pub struct OpenAiRequester {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: Option<SecretString>,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
    presence_penalty: f32,
}

impl OpenAiRequester {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.backend.timeout_secs))
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            endpoint: format!(
                "{}/chat/completions",
                config.backend.api_base.trim_end_matches('/')
            ),
            api_key: config
                .api_key
                .as_ref()
                .map(|key| SecretString::from(key.expose_secret().to_owned())),
            model: config.generation.model.clone(),
            temperature: config.generation.temperature,
            max_output_tokens: config.generation.max_output_tokens,
            presence_penalty: config.generation.presence_penalty,
        })
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "system",
                content: prompt,
            }],
            temperature: self.temperature,
            max_completion_tokens: self.max_output_tokens,
            presence_penalty: self.presence_penalty,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        }
    }
}

impl ProposalRequester for OpenAiRequester {
    #[instrument(skip_all, fields(model = %self.model))]
    fn request(&self, prompt: &str) -> Result<String> {
        info!(endpoint = %self.endpoint, "requesting folder proposal");
        let start = Instant::now();

        let mut builder = self.client.post(&self.endpoint).json(&self.build_request(prompt));
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }
        let response = builder.send().context("send chat completion request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|err| format!("<unreadable body: {err}>"));
            warn!(%status, "backend rejected proposal request");
            return Err(anyhow!("backend returned {}: {}", status, body.trim()));
        }

        let body: ChatCompletionResponse = response
            .json()
            .context("decode chat completion response")?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| anyhow!("backend response contained no message content"))?;

        debug!(
            bytes = content.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "received folder proposal"
        );
        Ok(content)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_completion_tokens: u32,
    presence_penalty: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}
