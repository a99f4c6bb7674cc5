//! Recording adapter for the `LlmClient` port.

use std::sync::{Arc, Mutex};

use crate::cassette::recorder::LlmRecorder;
use crate::ports::llm::{ChatRequest, LlmClient, LlmFuture};

/// Passes completions through to `inner` and records each one.
pub struct RecordingLlmClient {
    inner: Box<dyn LlmClient>,
    recorder: Arc<Mutex<LlmRecorder>>,
}

impl RecordingLlmClient {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn LlmClient>, recorder: Arc<Mutex<LlmRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl LlmClient for RecordingLlmClient {
    fn complete(&self, request: &ChatRequest) -> LlmFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let result = self.inner.complete(&request).await;
            self.recorder
                .lock()
                .expect("llm recorder lock poisoned")
                .record(request, result.clone());
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::LlmCassette;
    use crate::ports::llm::{ChatMessage, ChatResponse, Choice, LlmError, Role};

    struct FixedLlm(Result<ChatResponse, LlmError>);

    impl LlmClient for FixedLlm {
        fn complete(&self, _request: &ChatRequest) -> LlmFuture<'_> {
            let result = self.0.clone();
            Box::pin(async move { result })
        }
    }

    #[tokio::test]
    async fn records_answers_and_failures_with_their_requests() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("llm.cassette.yaml");
        let recorder = Arc::new(Mutex::new(LlmRecorder::new("llm", &path)));
        let answer = ChatResponse {
            choices: vec![Choice {
                message: ChatMessage { role: Role::Assistant, content: "4".into() },
            }],
        };
        let failure = LlmError::Network("connection refused".into());

        let ok_client =
            RecordingLlmClient::new(Box::new(FixedLlm(Ok(answer.clone()))), Arc::clone(&recorder));
        let err_client =
            RecordingLlmClient::new(Box::new(FixedLlm(Err(failure.clone()))), Arc::clone(&recorder));

        let asked = ChatRequest::single_turn("m", "2+2?");
        assert_eq!(ok_client.complete(&asked).await, Ok(answer.clone()));
        assert_eq!(err_client.complete(&ChatRequest::single_turn("m", "p")).await, Err(failure.clone()));
        drop((ok_client, err_client));

        Arc::try_unwrap(recorder).unwrap().into_inner().unwrap().finish().unwrap();
        let cassette = LlmCassette::load(&path).unwrap();
        assert_eq!(cassette.exchanges.len(), 2);
        assert_eq!(cassette.exchanges[0].request, asked);
        assert_eq!(cassette.exchanges[0].result, Ok(answer));
        assert_eq!(cassette.exchanges[1].result, Err(failure));
    }
}
