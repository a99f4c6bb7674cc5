//! Cassettes: YAML files of recorded port exchanges, one file per port.
//!
//! Recording adapters push each request and its result into a
//! [`recorder::CassetteRecorder`]; replaying adapters hand the results back
//! through a [`replayer::CassetteReplayer`], checking that the same requests
//! arrive in the same order.

use std::path::{Path, PathBuf};

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;

/// Port name used for language-model exchanges.
pub const LLM_PORT: &str = "llm";
/// Port name used for shell exchanges.
pub const SHELL_PORT: &str = "shell";

/// Where the cassette for `port` lives inside a recording directory.
#[must_use]
pub fn cassette_path(dir: &Path, port: &str) -> PathBuf {
    dir.join(format!("{port}.cassette.yaml"))
}
