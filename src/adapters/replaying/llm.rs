//! Replaying adapter for the `LlmClient` port.

use std::sync::Mutex;

use crate::cassette::replayer::LlmReplayer;
use crate::ports::llm::{ChatRequest, LlmClient, LlmFuture};

/// Answers completions from a recorded LLM cassette.
pub struct ReplayingLlmClient {
    replayer: Mutex<LlmReplayer>,
}

impl ReplayingLlmClient {
    /// A client that answers from `replayer`.
    #[must_use]
    pub fn new(replayer: LlmReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl LlmClient for ReplayingLlmClient {
    fn complete(&self, request: &ChatRequest) -> LlmFuture<'_> {
        let result = self.replayer.lock().expect("llm replayer lock poisoned").answer(request);
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Exchange};
    use crate::ports::llm::{ChatMessage, ChatResponse, Choice, LlmError, Role};

    #[tokio::test]
    async fn replays_answers_then_errors_in_order() {
        let asked = ChatRequest::single_turn("m", "capital of Japan?");
        let tokyo = ChatResponse {
            choices: vec![Choice {
                message: ChatMessage { role: Role::Assistant, content: "Tokyo".into() },
            }],
        };
        let rejected = LlmError::Auth("Incorrect API key provided".into());
        let client = ReplayingLlmClient::new(LlmReplayer::new(Cassette::new(
            "llm",
            vec![
                Exchange { request: asked.clone(), result: Ok(tokyo) },
                Exchange { request: asked.clone(), result: Err(rejected.clone()) },
            ],
        )));

        let first = client.complete(&asked).await.unwrap();
        assert_eq!(first.first_text(), Some("Tokyo"));
        assert_eq!(client.complete(&asked).await.unwrap_err(), rejected);
    }

    #[test]
    #[should_panic(expected = "llm cassette mismatch")]
    fn different_prompt_panics() {
        let client = ReplayingLlmClient::new(LlmReplayer::new(Cassette::new(
            "llm",
            vec![Exchange {
                request: ChatRequest::single_turn("m", "recorded"),
                result: Ok(ChatResponse::default()),
            }],
        )));
        let _ = client.complete(&ChatRequest::single_turn("m", "something else"));
    }
}
