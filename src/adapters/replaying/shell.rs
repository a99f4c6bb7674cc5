//! Replaying adapter for the `ShellExecutor` port.

use std::sync::Mutex;

use crate::cassette::replayer::ShellReplayer;
use crate::ports::shell::{ShellError, ShellExecutor, ShellOutput, ShellRequest};

/// Answers commands from a recorded shell cassette; nothing is executed.
pub struct ReplayingShellExecutor {
    replayer: Mutex<ShellReplayer>,
}

impl ReplayingShellExecutor {
    /// An executor that answers from `replayer`.
    #[must_use]
    pub fn new(replayer: ShellReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn run(&self, request: &ShellRequest) -> Result<ShellOutput, ShellError> {
        self.replayer.lock().expect("shell replayer lock poisoned").answer(request)
    }
}
