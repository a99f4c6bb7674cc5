//! A recording session: one directory, one recorder per port.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use super::recorder::{CassetteRecorder, LlmRecorder, ShellRecorder};
use super::{cassette_path, LLM_PORT, SHELL_PORT};

/// Recorders shared with the recording adapters, plus the directory they write to.
///
/// Cassettes land in `<base>/<timestamp>/{llm,shell}.cassette.yaml`.
pub struct RecordingSession {
    /// Shared with `RecordingLlmClient`.
    pub llm: Arc<Mutex<LlmRecorder>>,
    /// Shared with `RecordingShellExecutor`.
    pub shell: Arc<Mutex<ShellRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Creates `<base>/<timestamp>/` and a recorder for each port.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or cannot be created.
    pub fn new(base: &Path) -> Result<Self, String> {
        let output_dir = base.join(Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string());
        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;
        debug!(dir = %output_dir.display(), "Recording session started");

        Ok(Self {
            llm: Arc::new(Mutex::new(CassetteRecorder::new(
                LLM_PORT,
                cassette_path(&output_dir, LLM_PORT),
            ))),
            shell: Arc::new(Mutex::new(CassetteRecorder::new(
                SHELL_PORT,
                cassette_path(&output_dir, SHELL_PORT),
            ))),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes a cassette for every port that was called and returns the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a recording adapter still holds its recorder or a
    /// cassette cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        write_port(self.llm, LLM_PORT)?;
        write_port(self.shell, SHELL_PORT)?;
        Ok(self.output_dir)
    }
}

fn write_port<Req: Serialize, Res: Serialize>(
    shared: Arc<Mutex<CassetteRecorder<Req, Res>>>,
    port: &str,
) -> Result<(), String> {
    let recorder = Arc::try_unwrap(shared)
        .map_err(|_| format!("Recording adapter for {port} is still alive"))?
        .into_inner()
        .map_err(|e| format!("Recorder for {port} was poisoned: {e}"))?;
    if recorder.is_empty() {
        return Ok(());
    }
    let exchanges = recorder.len();
    let path = recorder.finish()?;
    info!(port, exchanges, path = %path.display(), "Cassette written");
    Ok(())
}
