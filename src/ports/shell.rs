//! Shell executor port for running external commands.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A command line to hand to the system shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellRequest {
    /// Command string, interpreted by the shell verbatim.
    pub command: String,
    /// Directory the child process starts in. `None` inherits ours.
    pub working_dir: Option<PathBuf>,
    /// Wall-clock limit after which the child is killed.
    pub timeout: Duration,
}

/// The output of a shell command execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellOutput {
    /// The exit code of the process, `-1` when it was ended by a signal.
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

impl ShellOutput {
    /// Whether the command exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Failure to obtain a [`ShellOutput`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ShellError {
    /// The shell process could not be started.
    #[error("failed to spawn shell: {0}")]
    Spawn(String),
    /// Waiting on or reading from the child failed.
    #[error("{0}")]
    Io(String),
    /// The child outlived its timeout and was killed.
    #[error("command timed out after {0:?}")]
    TimedOut(Duration),
}

/// Executes shell commands.
///
/// Abstracting shell execution allows deterministic replay by recording
/// and replaying command outputs during cassette playback.
pub trait ShellExecutor: Send + Sync {
    /// Runs a command string in the system shell and returns its output.
    ///
    /// A non-zero exit status is not an error; it is reported through
    /// [`ShellOutput::exit_code`].
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned, cannot be waited
    /// on, or exceeds its timeout.
    fn run(&self, request: &ShellRequest) -> Result<ShellOutput, ShellError>;
}
