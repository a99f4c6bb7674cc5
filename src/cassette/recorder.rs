//! Collects one port's exchanges during a recording session.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::format::{Cassette, Exchange};
use crate::ports::llm::{ChatRequest, ChatResponse, LlmError};
use crate::ports::shell::{ShellError, ShellOutput, ShellRequest};

/// Buffers exchanges in memory until [`CassetteRecorder::finish`] writes them.
#[derive(Debug)]
pub struct CassetteRecorder<Req, Res> {
    port: String,
    path: PathBuf,
    exchanges: Vec<Exchange<Req, Res>>,
}

/// Recorder for the LLM port.
pub type LlmRecorder = CassetteRecorder<ChatRequest, Result<ChatResponse, LlmError>>;
/// Recorder for the shell port.
pub type ShellRecorder = CassetteRecorder<ShellRequest, Result<ShellOutput, ShellError>>;

impl<Req: Serialize, Res: Serialize> CassetteRecorder<Req, Res> {
    /// A recorder for `port` that will write to `path`.
    pub fn new(port: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { port: port.into(), path: path.into(), exchanges: Vec::new() }
    }

    /// Appends one exchange.
    pub fn record(&mut self, request: Req, result: Res) {
        self.exchanges.push(Exchange { request, result });
    }

    /// Exchanges recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    /// Whether the port has not been called yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// File the cassette will be written to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the cassette and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be serialized or written.
    pub fn finish(self) -> Result<PathBuf, String> {
        Cassette::new(self.port, self.exchanges).save(&self.path)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::cassette::format::ShellCassette;

    fn request(command: &str) -> ShellRequest {
        ShellRequest { command: command.into(), working_dir: None, timeout: Duration::from_secs(5) }
    }

    #[test]
    fn finish_writes_exchanges_in_call_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shell.cassette.yaml");

        let mut recorder = ShellRecorder::new("shell", &path);
        assert!(recorder.is_empty());
        recorder.record(
            request("echo one"),
            Ok(ShellOutput { exit_code: 0, stdout: "one\n".into(), stderr: String::new() }),
        );
        recorder.record(request("nope"), Err(ShellError::Spawn("No such file".into())));
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.path(), path);

        assert_eq!(recorder.finish().unwrap(), path);

        let cassette = ShellCassette::load(&path).unwrap();
        assert_eq!(cassette.port, "shell");
        assert_eq!(cassette.exchanges[0].request.command, "echo one");
        assert_eq!(cassette.exchanges[1].result, Err(ShellError::Spawn("No such file".into())));
    }

    #[test]
    fn finish_reports_unwritable_path() {
        let recorder = ShellRecorder::new("shell", "/no/such/dir/shell.cassette.yaml");
        let err = recorder.finish().unwrap_err();
        assert!(err.contains("Failed to write cassette file"));
    }
}
