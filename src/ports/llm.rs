//! LLM client port for chat completions.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed future type alias used by [`LlmClient`] to keep the trait dyn-compatible.
pub type LlmFuture<'a> = Pin<Box<dyn Future<Output = Result<ChatResponse, LlmError>> + Send + 'a>>;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that steer the model.
    System,
    /// The human side of the conversation.
    User,
    /// A reply produced by the model.
    Assistant,
}

/// A single message in a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a `user` message.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    /// Creates a `system` message.
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }
}

/// A request to generate a chat completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The model identifier (e.g. `"gpt-4-turbo-preview"`).
    pub model: String,
    /// The conversation sent to the model.
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Builds a conversation holding only the given user prompt.
    pub fn single_turn(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self { model: model.into(), messages: vec![ChatMessage::user(prompt)] }
    }
}

/// One alternative returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ChatMessage,
}

/// The response from a chat completion call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated alternatives, possibly empty.
    pub choices: Vec<Choice>,
}

impl ChatResponse {
    /// Text of the first choice, if any.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.message.content.as_str())
    }
}

/// Failure reported by an [`LlmClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LlmError {
    /// Missing or rejected credentials.
    #[error("authentication failed: {0}")]
    Auth(String),
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// The service answered with an error status or an unreadable body.
    #[error("{}", service_message(.status.as_ref().copied(), .message))]
    Service {
        /// HTTP status, when one was received.
        status: Option<u16>,
        /// Error text reported by the service.
        message: String,
    },
}

fn service_message(status: Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("service error ({code}): {message}"),
        None => format!("service error: {message}"),
    }
}

/// Sends chat completion requests to a language model.
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, auth, rate-limit, etc.).
    fn complete(&self, request: &ChatRequest) -> LlmFuture<'_>;
}
