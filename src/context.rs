//! Service context bundling the port trait objects.

use std::path::Path;

use crate::adapters::live::{LiveLlmClient, LiveShellExecutor};
use crate::adapters::recording::{RecordingLlmClient, RecordingShellExecutor};
use crate::adapters::replaying::{ReplayingLlmClient, ReplayingShellExecutor};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::config::Config;
use crate::directives::{AskDirective, DoDirective};
use crate::ports::llm::{ChatRequest, LlmClient, LlmFuture};
use crate::ports::shell::{ShellError, ShellExecutor, ShellOutput, ShellRequest};

/// Bundles the port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying).
pub struct ServiceContext {
    /// LLM client used by `:ask`.
    pub llm: Box<dyn LlmClient>,
    /// Shell executor used by `:do`.
    pub shell: Box<dyn ShellExecutor>,
}

impl ServiceContext {
    /// Creates a live context talking to the real service and shell.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self { llm: Box::new(LiveLlmClient::new(config)), shell: Box::new(LiveShellExecutor) }
    }

    /// Creates a recording context whose cassettes land under `base`.
    ///
    /// The returned session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette directory cannot be created.
    pub fn recording_at(base: &Path, config: &Config) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(base)?;
        let ctx = Self {
            llm: Box::new(RecordingLlmClient::new(
                Box::new(LiveLlmClient::new(config)),
                session.llm.clone(),
            )),
            shell: Box::new(RecordingShellExecutor::new(
                Box::new(LiveShellExecutor),
                session.shell.clone(),
            )),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette panic with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying(cassettes: &CassetteConfig) -> Result<Self, String> {
        let llm: Box<dyn LlmClient> = match cassettes.llm_replayer()? {
            Some(replayer) => Box::new(ReplayingLlmClient::new(replayer)),
            None => Box::new(PanickingLlmClient),
        };
        let shell: Box<dyn ShellExecutor> = match cassettes.shell_replayer()? {
            Some(replayer) => Box::new(ReplayingShellExecutor::new(replayer)),
            None => Box::new(PanickingShellExecutor),
        };
        Ok(Self { llm, shell })
    }

    /// `:ask` handler bound to this context's LLM client.
    #[must_use]
    pub fn ask(&self) -> AskDirective<'_> {
        AskDirective::new(self.llm.as_ref())
    }

    /// `:do` handler bound to this context's shell executor.
    #[must_use]
    pub fn action(&self) -> DoDirective<'_> {
        DoDirective::new(self.shell.as_ref())
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingShellExecutor;
impl ShellExecutor for PanickingShellExecutor {
    fn run(&self, _request: &ShellRequest) -> Result<ShellOutput, ShellError> {
        panic!("ShellExecutor port not configured in CassetteConfig: no cassette loaded for shell");
    }
}

struct PanickingLlmClient;
impl LlmClient for PanickingLlmClient {
    fn complete(&self, _request: &ChatRequest) -> LlmFuture<'_> {
        panic!("LlmClient port not configured in CassetteConfig: no cassette loaded for llm");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::cassette::recorder::{LlmRecorder, ShellRecorder};
    use crate::cassette::{cassette_path, LLM_PORT, SHELL_PORT};
    use crate::directives::{ActionOutcome, AskError, ACTION_TIMEOUT};
    use crate::ports::llm::{ChatMessage, ChatResponse, Choice, Role};

    #[tokio::test]
    async fn replaying_context_serves_both_ports() {
        let dir = tempfile::tempdir().unwrap();

        let mut llm = LlmRecorder::new(LLM_PORT, cassette_path(dir.path(), LLM_PORT));
        llm.record(
            ChatRequest::single_turn("m", "capital of France?"),
            Ok(ChatResponse {
                choices: vec![Choice {
                    message: ChatMessage { role: Role::Assistant, content: "Paris".into() },
                }],
            }),
        );
        llm.record(ChatRequest::single_turn("m", "anything"), Ok(ChatResponse::default()));
        llm.finish().unwrap();

        let mut shell = ShellRecorder::new(SHELL_PORT, cassette_path(dir.path(), SHELL_PORT));
        shell.record(
            ShellRequest { command: "echo hi".into(), working_dir: None, timeout: ACTION_TIMEOUT },
            Ok(ShellOutput { exit_code: 0, stdout: "hi\n".into(), stderr: String::new() }),
        );
        shell.record(
            ShellRequest { command: "sleep 60".into(), working_dir: None, timeout: ACTION_TIMEOUT },
            Err(ShellError::TimedOut(Duration::from_secs(5))),
        );
        shell.finish().unwrap();

        let ctx = ServiceContext::replaying(&CassetteConfig::from_recording_dir(dir.path())).unwrap();
        assert_eq!(ctx.ask().dispatch("capital of France?", "m").await.unwrap(), "Paris");
        assert_eq!(ctx.ask().dispatch("anything", "m").await, Err(AskError::EmptyResponse));
        assert_eq!(ctx.action().run("echo hi", None), ActionOutcome::Success("hi\n".into()));
        assert_eq!(ctx.action().run("sleep 60", None), ActionOutcome::Timeout);
    }

    #[test]
    #[should_panic(expected = "not configured in CassetteConfig")]
    fn unspecified_port_panics_with_clear_message() {
        let ctx = ServiceContext::replaying(&CassetteConfig::default()).unwrap();
        let _ = ctx.action().run("echo hi", None);
    }
}
