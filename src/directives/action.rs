//! The `:do` directive: run an action through the shell.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::ports::shell::{ShellError, ShellExecutor, ShellRequest};

/// Wall-clock limit for a single action.
pub const ACTION_TIMEOUT: Duration = Duration::from_secs(5);

/// What happened to an action.
///
/// `Display` renders the message a caller of the directive sees: the
/// captured stdout on success, an `Error...` line otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Exit status zero; holds captured stdout.
    Success(String),
    /// Non-zero exit or killed by a signal.
    CommandFailed {
        /// Captured standard error.
        stderr: String,
    },
    /// The action outlived [`ACTION_TIMEOUT`].
    Timeout,
    /// A working directory was given and the action contains `..`.
    TraversalRejected,
    /// The action could not be started (directory creation, spawn, I/O).
    SetupFailed(String),
}

impl ActionOutcome {
    /// Whether the action ran and exited with status zero.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(stdout) => f.write_str(stdout),
            Self::CommandFailed { stderr } => write!(f, "Error executing action: {stderr}"),
            Self::Timeout => f.write_str("Error: Command timed out"),
            Self::TraversalRejected => f.write_str("Error: Directory traversal not allowed"),
            Self::SetupFailed(cause) => write!(f, "Error: {cause}"),
        }
    }
}

/// Runs actions through a [`ShellExecutor`].
///
/// The working directory is handed to the child process; the current
/// directory of this process is never changed, so concurrent calls are safe.
pub struct DoDirective<'a> {
    shell: &'a dyn ShellExecutor,
    timeout: Duration,
}

impl<'a> DoDirective<'a> {
    /// Creates a handler with the standard [`ACTION_TIMEOUT`].
    pub fn new(shell: &'a dyn ShellExecutor) -> Self {
        Self { shell, timeout: ACTION_TIMEOUT }
    }

    /// Runs `action` with `sh -c`, inside `working_dir` when one is given.
    ///
    /// The working directory is created if missing. When it is given, an
    /// action containing `..` anywhere is rejected without running. No such
    /// check happens without a working directory.
    pub fn run(&self, action: &str, working_dir: Option<&Path>) -> ActionOutcome {
        let working_dir = working_dir.filter(|dir| !dir.as_os_str().is_empty());
        let invocation_id = Uuid::new_v4();
        info!(
            invocation_id = %invocation_id,
            working_dir = ?working_dir,
            "Processing do directive"
        );

        if let Some(dir) = working_dir {
            if let Err(e) = std::fs::create_dir_all(dir) {
                warn!(invocation_id = %invocation_id, error = %e, "Failed to create working directory");
                return ActionOutcome::SetupFailed(e.to_string());
            }
            if action.contains("..") {
                warn!(invocation_id = %invocation_id, "Rejected action containing '..'");
                return ActionOutcome::TraversalRejected;
            }
        }

        let request = ShellRequest {
            command: action.to_string(),
            working_dir: working_dir.map(Path::to_path_buf),
            timeout: self.timeout,
        };

        let outcome = match self.shell.run(&request) {
            Ok(output) if output.success() => ActionOutcome::Success(output.stdout),
            Ok(output) => ActionOutcome::CommandFailed { stderr: output.stderr },
            Err(ShellError::TimedOut(_)) => ActionOutcome::Timeout,
            Err(e) => ActionOutcome::SetupFailed(e.to_string()),
        };
        debug!(invocation_id = %invocation_id, success = outcome.is_success(), "Do directive finished");
        outcome
    }
}
