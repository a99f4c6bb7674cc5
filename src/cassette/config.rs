//! Which cassette each port replays from.

use std::path::{Path, PathBuf};

use super::replayer::{LlmReplayer, ShellReplayer};
use super::{cassette_path, LLM_PORT, SHELL_PORT};

/// Per-port cassette paths. A port left as `None` panics if called during replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CassetteConfig {
    /// Cassette for the LLM port.
    pub llm: Option<PathBuf>,
    /// Cassette for the shell port.
    pub shell: Option<PathBuf>,
}

impl CassetteConfig {
    /// Points each port at its cassette inside a recording directory, when
    /// that port was used during the recording.
    #[must_use]
    pub fn from_recording_dir(dir: &Path) -> Self {
        let existing = |port| Some(cassette_path(dir, port)).filter(|path| path.exists());
        Self { llm: existing(LLM_PORT), shell: existing(SHELL_PORT) }
    }

    /// Loads the LLM cassette, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured file cannot be read or parsed.
    pub fn llm_replayer(&self) -> Result<Option<LlmReplayer>, String> {
        self.llm.as_deref().map(LlmReplayer::load).transpose()
    }

    /// Loads the shell cassette, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured file cannot be read or parsed.
    pub fn shell_replayer(&self) -> Result<Option<ShellReplayer>, String> {
        self.shell.as_deref().map(ShellReplayer::load).transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::cassette::recorder::ShellRecorder;
    use crate::ports::shell::{ShellOutput, ShellRequest};

    #[test]
    fn nothing_configured_loads_nothing() {
        let config = CassetteConfig::default();
        assert!(config.llm_replayer().unwrap().is_none());
        assert!(config.shell_replayer().unwrap().is_none());
    }

    #[test]
    fn from_recording_dir_picks_up_only_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let request =
            ShellRequest { command: "ls".into(), working_dir: None, timeout: Duration::from_secs(5) };
        let mut recorder = ShellRecorder::new(SHELL_PORT, cassette_path(dir.path(), SHELL_PORT));
        recorder.record(
            request.clone(),
            Ok(ShellOutput { exit_code: 0, stdout: "a\n".into(), stderr: String::new() }),
        );
        recorder.finish().unwrap();

        let config = CassetteConfig::from_recording_dir(dir.path());
        assert_eq!(config.llm, None);
        assert_eq!(config.shell, Some(dir.path().join("shell.cassette.yaml")));

        let mut shell = config.shell_replayer().unwrap().unwrap();
        assert_eq!(shell.answer(&request).unwrap().stdout, "a\n");
    }

    #[test]
    fn missing_file_is_reported() {
        let config = CassetteConfig {
            llm: Some(PathBuf::from("/no/such/llm.cassette.yaml")),
            ..CassetteConfig::default()
        };
        let err = config.llm_replayer().unwrap_err();
        assert!(err.contains("Failed to read cassette file"));
    }
}
