//! Hands one port's recorded results back in call order.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::format::{Cassette, Exchange};
use crate::ports::llm::{ChatRequest, ChatResponse, LlmError};
use crate::ports::shell::{ShellError, ShellOutput, ShellRequest};

/// Serves a cassette's results, one per call.
///
/// Each call must carry the request that was recorded at that position;
/// anything else means the code under replay has drifted from the recording.
#[derive(Debug)]
pub struct CassetteReplayer<Req, Res> {
    port: String,
    pending: VecDeque<Exchange<Req, Res>>,
    served: usize,
}

/// Replayer for the LLM port.
pub type LlmReplayer = CassetteReplayer<ChatRequest, Result<ChatResponse, LlmError>>;
/// Replayer for the shell port.
pub type ShellReplayer = CassetteReplayer<ShellRequest, Result<ShellOutput, ShellError>>;

impl<Req: PartialEq + Debug, Res> CassetteReplayer<Req, Res> {
    /// A replayer over the cassette's exchanges.
    #[must_use]
    pub fn new(cassette: Cassette<Req, Res>) -> Self {
        Self { port: cassette.port, pending: cassette.exchanges.into(), served: 0 }
    }

    /// Exchanges not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// The recorded result for `request`.
    ///
    /// # Panics
    ///
    /// Panics when the cassette is used up, or when `request` differs from
    /// the one recorded at this position.
    pub fn answer(&mut self, request: &Req) -> Res {
        let position = self.served;
        let Some(exchange) = self.pending.pop_front() else {
            panic!(
                "{} cassette exhausted: all {position} recorded exchanges were already served, \
                 got another request: {request:?}",
                self.port
            );
        };
        assert!(
            exchange.request == *request,
            "{} cassette mismatch at exchange {position}:\n  recorded: {:?}\n  received: {request:?}",
            self.port,
            exchange.request,
        );
        self.served += 1;
        exchange.result
    }
}

impl<Req, Res> CassetteReplayer<Req, Res>
where
    Req: PartialEq + Debug + DeserializeOwned,
    Res: DeserializeOwned,
{
    /// Loads the cassette at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        Ok(Self::new(Cassette::load(path)?))
    }
}
