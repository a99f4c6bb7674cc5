//! The `:ask` directive: forward a prompt to a language model.

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::ports::llm::{ChatMessage, ChatRequest, LlmClient, LlmError};

pub use crate::config::DEFAULT_MODEL;

const SUMMARY_INSTRUCTION: &str = "You are a summarizer that creates extremely concise summaries. \
Keep summaries under 5 words. As short as possible, without losing the point. For example:\n\
\"The capital of Japan is Tokyo.\" -> \"Tokyo\"\n\
\"Hello, world!\" -> \"Hello, world!\"";

/// Failure while processing an `:ask` directive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AskError {
    /// Credential missing or rejected.
    #[error("Error processing ask directive: authentication failed: {0}")]
    Auth(String),
    /// The service could not be reached.
    #[error("Error processing ask directive: network error: {0}")]
    Network(String),
    /// The service answered without any choice.
    #[error("Error processing ask directive: No response from model")]
    EmptyResponse,
    /// Any other failure reported by the service.
    #[error("Error processing ask directive: {0}")]
    Service(String),
}

impl From<LlmError> for AskError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Auth(msg) => Self::Auth(msg),
            LlmError::Network(msg) => Self::Network(msg),
            service @ LlmError::Service { .. } => Self::Service(service.to_string()),
        }
    }
}

/// Sends prompts to a language model through an [`LlmClient`].
pub struct AskDirective<'a> {
    llm: &'a dyn LlmClient,
}

impl<'a> AskDirective<'a> {
    /// Creates a handler that talks to the given client.
    pub fn new(llm: &'a dyn LlmClient) -> Self {
        Self { llm }
    }

    /// Sends `prompt` as a single user message and returns the first choice's text.
    ///
    /// The text is returned exactly as the service produced it.
    ///
    /// # Errors
    ///
    /// Returns [`AskError::EmptyResponse`] when the service returns no
    /// choices, and the matching variant for any client failure.
    pub async fn dispatch(&self, prompt: &str, model: &str) -> Result<String, AskError> {
        self.first_choice(ChatRequest::single_turn(model, prompt)).await
    }

    /// Asks the model for a summary of `text` in under five words.
    ///
    /// # Errors
    ///
    /// Same as [`AskDirective::dispatch`].
    pub async fn summarize(&self, text: &str, model: &str) -> Result<String, AskError> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage::system(SUMMARY_INSTRUCTION),
                ChatMessage::user(format!("Summarize this in under 5 words:\n{text}")),
            ],
        };
        let summary = self.first_choice(request).await?;
        Ok(summary.trim().to_string())
    }

    async fn first_choice(&self, request: ChatRequest) -> Result<String, AskError> {
        let invocation_id = Uuid::new_v4();
        info!(invocation_id = %invocation_id, model = %request.model, "Processing ask directive");

        let response = self.llm.complete(&request).await.map_err(|e| {
            warn!(invocation_id = %invocation_id, error = %e, "Language model call failed");
            AskError::from(e)
        })?;

        let mut choices = response.choices.into_iter();
        let Some(first) = choices.next() else {
            warn!(invocation_id = %invocation_id, "Language model returned no choices");
            return Err(AskError::EmptyResponse);
        };
        Ok(first.message.content)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ports::llm::{ChatResponse, Choice, LlmFuture, Role};

    /// Returns a canned result and remembers the last request.
    struct CannedLlm {
        result: Result<ChatResponse, LlmError>,
        seen: Mutex<Option<ChatRequest>>,
    }

    impl CannedLlm {
        fn new(result: Result<ChatResponse, LlmError>) -> Self {
            Self { result, seen: Mutex::new(None) }
        }

        fn answering(texts: &[&str]) -> Self {
            let choices = texts
                .iter()
                .map(|text| Choice {
                    message: ChatMessage { role: Role::Assistant, content: (*text).to_string() },
                })
                .collect();
            Self::new(Ok(ChatResponse { choices }))
        }
    }

    impl LlmClient for CannedLlm {
        fn complete(&self, request: &ChatRequest) -> LlmFuture<'_> {
            *self.seen.lock().unwrap() = Some(request.clone());
            let result = self.result.clone();
            Box::pin(async move { result })
        }
    }

    #[tokio::test]
    async fn returns_first_choice_verbatim() {
        let llm = CannedLlm::answering(&["  4\n", "four"]);
        let answer = AskDirective::new(&llm).dispatch("What is 2+2?", DEFAULT_MODEL).await;
        assert_eq!(answer.unwrap(), "  4\n");

        let seen = llm.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen, ChatRequest::single_turn("gpt-4-turbo-preview", "What is 2+2?"));
    }

    #[tokio::test]
    async fn empty_prompt_is_forwarded() {
        let llm = CannedLlm::answering(&["ok"]);
        assert_eq!(AskDirective::new(&llm).dispatch("", "m").await.unwrap(), "ok");
        assert_eq!(llm.seen.lock().unwrap().as_ref().unwrap().messages[0].content, "");
    }

    #[tokio::test]
    async fn no_choices_is_empty_response() {
        let llm = CannedLlm::answering(&[]);
        let err = AskDirective::new(&llm).dispatch("hi", "m").await.unwrap_err();
        assert_eq!(err, AskError::EmptyResponse);
        assert!(err.to_string().contains("No response from model"));
    }

    #[tokio::test]
    async fn client_failure_keeps_original_text_with_prefix() {
        let llm = CannedLlm::new(Err(LlmError::Service {
            status: Some(429),
            message: "Rate limit reached".into(),
        }));
        let err = AskDirective::new(&llm).dispatch("hi", "m").await.unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Error processing ask directive: "));
        assert!(message.contains("Rate limit reached"));
        assert!(matches!(err, AskError::Service(_)));
    }

    #[tokio::test]
    async fn auth_and_network_failures_keep_their_kind() {
        let llm = CannedLlm::new(Err(LlmError::Auth(
            "OPENAI_API_KEY environment variable is not set".into(),
        )));
        let err = AskDirective::new(&llm).dispatch("hi", "m").await.unwrap_err();
        assert!(matches!(err, AskError::Auth(ref m) if m.contains("OPENAI_API_KEY")));

        let llm = CannedLlm::new(Err(LlmError::Network("connection refused".into())));
        let err = AskDirective::new(&llm).dispatch("hi", "m").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error processing ask directive: network error: connection refused"
        );
    }

    #[tokio::test]
    async fn summarize_sends_instruction_and_trims() {
        let llm = CannedLlm::answering(&[" Tokyo \n"]);
        let summary = AskDirective::new(&llm)
            .summarize("The capital of Japan is Tokyo.", "gpt-4o-mini")
            .await
            .unwrap();
        assert_eq!(summary, "Tokyo");

        let seen = llm.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.messages.len(), 2);
        assert_eq!(seen.messages[0].role, Role::System);
        assert_eq!(
            seen.messages[1].content,
            "Summarize this in under 5 words:\nThe capital of Japan is Tokyo."
        );
    }
}
