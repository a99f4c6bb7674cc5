//! On-disk cassette layout.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ports::llm::{ChatRequest, ChatResponse, LlmError};
use crate::ports::shell::{ShellError, ShellOutput, ShellRequest};

/// One call through a port: the request and what came back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange<Req, Res> {
    /// What the caller asked for.
    pub request: Req,
    /// What the port returned, errors included.
    pub result: Res,
}

/// Every exchange a single port saw during a session, in call order.
///
/// Results nest enums (`Err(TimedOut(..))`), which YAML tags cannot express,
/// so exchanges are written with every enum as a single-key map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "Req: Serialize, Res: Serialize",
    deserialize = "Req: Deserialize<'de>, Res: Deserialize<'de>"
))]
pub struct Cassette<Req, Res> {
    /// Port the exchanges went through (`llm` or `shell`).
    pub port: String,
    /// When the session was written.
    pub recorded_at: DateTime<Utc>,
    /// Exchanges in the order they happened.
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub exchanges: Vec<Exchange<Req, Res>>,
}

/// Cassette of `LlmClient::complete` calls.
pub type LlmCassette = Cassette<ChatRequest, Result<ChatResponse, LlmError>>;
/// Cassette of `ShellExecutor::run` calls.
pub type ShellCassette = Cassette<ShellRequest, Result<ShellOutput, ShellError>>;

impl<Req, Res> Cassette<Req, Res> {
    /// Stamps `exchanges` with the current time.
    pub fn new(port: impl Into<String>, exchanges: Vec<Exchange<Req, Res>>) -> Self {
        Self { port: port.into(), recorded_at: Utc::now(), exchanges }
    }
}

impl<Req: DeserializeOwned, Res: DeserializeOwned> Cassette<Req, Res> {
    /// Reads and parses a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a cassette of
    /// this port's types.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }
}

impl<Req: Serialize, Res: Serialize> Cassette<Req, Res> {
    /// Writes the cassette as YAML, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize {} cassette: {e}", self.port))?;
        std::fs::write(path, yaml)
            .map_err(|e| format!("Failed to write cassette file {}: {e}", path.display()))
    }
}
