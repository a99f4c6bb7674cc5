//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the directive handlers and an
//! external system (the language model service, the shell).
//! Implementations live in `src/adapters/`.

pub mod llm;
pub mod shell;

pub use llm::{ChatMessage, ChatRequest, ChatResponse, Choice, LlmClient, LlmError, LlmFuture, Role};
pub use shell::{ShellError, ShellExecutor, ShellOutput, ShellRequest};
