//! LLM API interaction.
//!
//! This module provides the interface for talking to an OpenAI-compatible
//! chat completion API.
//!
//! # Architecture
//!
//! - [`AskAsync`]: core trait; one system instruction plus one user message in,
//!   completion text out
//! - [`ChatCompletionClient`]: the HTTP implementation
//! - [`ask_logged`]: timing and logging around a single call
//!
//! A failed call is not retried; it ends the run.

use crate::error::{PipelineError, Result};
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// One chat completion request: an instruction and the content it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt<'a> {
    /// Model name sent to the API.
    pub model: &'a str,
    /// System instruction.
    pub system: &'a str,
    /// User message.
    pub user: &'a str,
}

/// Trait for async LLM interaction.
///
/// Implementors send a [`Prompt`] to a language model and return its reply.
/// The pipeline only ever holds one implementor and calls it sequentially.
pub trait AskAsync {
    /// The type of response returned by the LLM.
    type Response;

    /// Send the prompt and wait for the completion.
    async fn ask(&self, prompt: &Prompt<'_>) -> Result<Self::Response>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Client for `POST {api_base}/chat/completions`.
#[derive(Clone)]
pub struct ChatCompletionClient {
    http: Client,
    api_base: String,
    api_key: String,
    temperature: f32,
}

impl ChatCompletionClient {
    /// Create a client sharing an existing HTTP connection pool.
    ///
    /// # Arguments
    ///
    /// * `http` - reqwest client (also used for the news fetch)
    /// * `api_base` - e.g. `https://api.openai.com/v1`
    /// * `api_key` - bearer token
    /// * `temperature` - sampling temperature for every call
    pub fn new(
        http: Client,
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            temperature,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

impl fmt::Debug for ChatCompletionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionClient")
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl AskAsync for ChatCompletionClient {
    type Response = String;

    #[instrument(level = "debug", skip_all, fields(model = %prompt.model))]
    async fn ask(&self, prompt: &Prompt<'_>) -> Result<Self::Response> {
        let request = ChatRequest {
            model: prompt.model,
            temperature: self.temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt.user,
                },
            ],
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Model(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %truncate_for_log(&body, 300), "Chat completion API error");
            return Err(PipelineError::Model(format!(
                "{status}: {}",
                truncate_for_log(&body, 300)
            )));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Model(format!("unreadable response: {e}")))?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PipelineError::Model("response carried no completion".into()))
    }
}

/// Send one prompt, logging the elapsed time and a preview of the reply.
#[instrument(level = "info", skip_all, fields(model = %prompt.model))]
pub async fn ask_logged<M>(model: &M, prompt: &Prompt<'_>) -> Result<String>
where
    M: AskAsync<Response = String>,
{
    let t0 = Instant::now();
    let res = model.ask(prompt).await;
    let dt = t0.elapsed();

    match &res {
        Ok(reply) => {
            info!(elapsed_ms = dt.as_millis() as u64, chars = reply.len(), "Model call succeeded");
            debug!(reply = %truncate_for_log(reply, 300), "Model reply");
        }
        Err(e) => error!(elapsed_ms = dt.as_millis() as u64, error = %e, "Model call failed"),
    }
    res
}
