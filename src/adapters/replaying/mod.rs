//! Replaying adapters: answer from a cassette instead of the outside world.

pub mod llm;
pub mod shell;

pub use llm::ReplayingLlmClient;
pub use shell::ReplayingShellExecutor;
