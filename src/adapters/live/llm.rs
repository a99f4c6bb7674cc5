//! Live adapter for the `LlmClient` port using the OpenAI chat completions API.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Config, API_KEY_VAR};
use crate::ports::llm::{
    ChatMessage, ChatRequest, ChatResponse, Choice, LlmClient, LlmError, LlmFuture, Role,
};

/// Live LLM client that calls an OpenAI-compatible API.
pub struct LiveLlmClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl LiveLlmClient {
    /// Creates a new live LLM client from the given configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            endpoint: format!("{}/chat/completions", config.base_url),
        }
    }
}

impl Default for LiveLlmClient {
    fn default() -> Self {
        Self::new(&Config::from_env())
    }
}

/// Request body sent to the chat completions endpoint.
#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

/// Top-level response from the chat completions endpoint.
#[derive(Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

/// A choice in the chat completions response.
#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

/// Message inside a choice. `content` is null for tool-call replies.
#[derive(Deserialize)]
struct OpenAiMessage {
    role: Option<String>,
    content: Option<String>,
}

impl OpenAiMessage {
    /// Missing or unfamiliar roles (`tool`, `developer`, ...) read as the assistant's.
    fn role(&self) -> Role {
        match self.role.as_deref() {
            Some("system") => Role::System,
            Some("user") => Role::User,
            _ => Role::Assistant,
        }
    }
}

/// Error response from the API.
#[derive(Deserialize)]
struct OpenAiError {
    error: OpenAiErrorDetail,
}

/// Detail inside an error response.
#[derive(Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

fn status_error(status: StatusCode, body: String) -> LlmError {
    let message = serde_json::from_str::<OpenAiError>(&body).map(|e| e.error.message).unwrap_or(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth(message),
        _ => LlmError::Service { status: Some(status.as_u16()), message },
    }
}

impl LlmClient for LiveLlmClient {
    fn complete(&self, request: &ChatRequest) -> LlmFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let api_key = self
                .api_key
                .as_deref()
                .ok_or_else(|| LlmError::Auth(format!("{API_KEY_VAR} environment variable is not set")))?;

            let body = OpenAiRequest { model: &request.model, messages: &request.messages };
            debug!(endpoint = %self.endpoint, model = %request.model, "Sending chat completion request");

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| LlmError::Network(format!("request to {} failed: {e}", self.endpoint)))?;

            let status = response.status();
            let response_text = response
                .text()
                .await
                .map_err(|e| LlmError::Network(format!("failed to read response body: {e}")))?;

            if !status.is_success() {
                return Err(status_error(status, response_text));
            }

            let api_response: OpenAiResponse =
                serde_json::from_str(&response_text).map_err(|e| LlmError::Service {
                    status: Some(status.as_u16()),
                    message: format!("failed to parse response: {e}"),
                })?;

            let choices = api_response
                .choices
                .into_iter()
                .map(|choice| Choice {
                    message: ChatMessage {
                        role: choice.message.role(),
                        content: choice.message.content.unwrap_or_default(),
                    },
                })
                .collect();

            Ok(ChatResponse { choices })
        })
    }
}
