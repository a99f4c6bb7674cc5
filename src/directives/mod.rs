//! Directive handlers and the registry of directive names.

pub mod action;
pub mod ask;

use std::fmt;
use std::str::FromStr;

pub use action::{ActionOutcome, DoDirective, ACTION_TIMEOUT};
pub use ask::{AskDirective, AskError};

/// A directive this crate knows how to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `:ask`, send the body to a language model.
    Ask,
    /// `:do`, run the body as a shell action.
    Do,
}

impl DirectiveKind {
    /// Every registered directive, in listing order.
    pub const ALL: [Self; 2] = [Self::Ask, Self::Do];

    /// The directive name as written in a PML document.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ask => ":ask",
            Self::Do => ":do",
        }
    }

    /// Whether processing this directive may produce new blocks.
    #[must_use]
    pub fn can_generate_blocks(self) -> bool {
        matches!(self, Self::Do)
    }

    /// Looks up a directive by name; surrounding whitespace is ignored.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DirectiveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|kind| kind.name()).collect();
            format!("unknown directive '{}' (expected one of: {})", s.trim(), known.join(", "))
        })
    }
}
