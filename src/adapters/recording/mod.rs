//! Recording adapters: delegate to an inner adapter and write every
//! request with its result to the port's cassette.

pub mod llm;
pub mod shell;

pub use llm::RecordingLlmClient;
pub use shell::RecordingShellExecutor;
