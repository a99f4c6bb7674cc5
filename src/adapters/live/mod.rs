//! Live adapters for real external interactions.

pub mod llm;
pub mod shell;

pub use llm::LiveLlmClient;
pub use shell::LiveShellExecutor;
