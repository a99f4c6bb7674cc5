//! Recording adapter for the `ShellExecutor` port.

use std::sync::{Arc, Mutex};

use crate::cassette::recorder::ShellRecorder;
use crate::ports::shell::{ShellError, ShellExecutor, ShellOutput, ShellRequest};

/// Runs commands through `inner` and records each request and result.
pub struct RecordingShellExecutor {
    inner: Box<dyn ShellExecutor>,
    recorder: Arc<Mutex<ShellRecorder>>,
}

impl RecordingShellExecutor {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn ShellExecutor>, recorder: Arc<Mutex<ShellRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ShellExecutor for RecordingShellExecutor {
    fn run(&self, request: &ShellRequest) -> Result<ShellOutput, ShellError> {
        let result = self.inner.run(request);
        self.recorder
            .lock()
            .expect("shell recorder lock poisoned")
            .record(request.clone(), result.clone());
        result
    }
}
