//! Runtime configuration read from the environment.

use std::env;

/// Default model used by the `:ask` directive.
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

/// Default base URL of the OpenAI-compatible API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variable holding the API credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Settings shared by the CLI and the live adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bearer credential; `None` when `OPENAI_API_KEY` is unset or empty.
    pub api_key: Option<String>,
    /// API base, without the trailing `/chat/completions`.
    pub base_url: String,
    /// Model used when a caller does not pick one.
    pub model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { api_key: None, base_url: DEFAULT_BASE_URL.to_string(), model: DEFAULT_MODEL.to_string() }
    }
}

impl Config {
    /// Reads configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Self {
            api_key: get(API_KEY_VAR),
            base_url: get("OPENAI_BASE_URL")
                .map_or(defaults.base_url, |url| url.trim_end_matches('/').to_string()),
            model: get("PML_MODEL").unwrap_or(defaults.model),
        }
    }
}
