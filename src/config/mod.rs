// src/config/mod.rs

use crate::error::{AgentError, ConfigError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Loads the nearest `.env` file (searching up from the working directory)
/// into the process environment. Variables already set are left untouched.
/// A missing file is not an error.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded env file");
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable env file");
            None
        }
    }
}

/// Loads a specific env file. Variables already set are left untouched.
pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    dotenvy::from_path(path)?;
    debug!(path = %path.display(), "loaded env file");
    Ok(())
}

/// How far a bracketed action body extends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BracketMatching {
    /// The first `]` ends the body; anything after it is dropped.
    #[default]
    FirstClose,
    /// Nested `[`/`]` pairs are kept; the `]` that balances the opener ends
    /// the body. An unbalanced body is malformed.
    Balanced,
}

/// What the loop does with an action it cannot resolve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// End the run with no answer.
    #[default]
    Abort,
    /// Feed a format reminder back as the observation and keep going.
    Observe,
}

#[derive(Debug, Clone)]
pub struct ReactConfig {
    /// Maximum number of think/act cycles per run.
    ///
    /// Default: 5
    pub max_steps: usize,
    pub malformed_policy: MalformedPolicy,
    pub bracket_matching: BracketMatching,
}

impl ReactConfig {
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.max_steps == 0 {
            return Err(AgentError::InvalidConfig(
                "max_steps must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ReactConfig {
    fn default() -> Self {
        Self {
            max_steps: 5,
            malformed_policy: MalformedPolicy::default(),
            bracket_matching: BracketMatching::default(),
        }
    }
}

/// Connection settings for an OpenAI-compatible chat endpoint.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub temperature: f32,
}

impl LlmConfig {
    /// Loads `LLM_MODEL_ID`, `LLM_API_KEY`, `LLM_BASE_URL` and the optional
    /// `LLM_TIMEOUT` (seconds) from the process environment. Call
    /// [`load_dotenv`] first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let timeout = match lookup("LLM_TIMEOUT").filter(|v| !v.trim().is_empty()) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    var: "LLM_TIMEOUT",
                    reason: e.to_string(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            model: required("LLM_MODEL_ID")?,
            api_key: required("LLM_API_KEY")?,
            base_url: required("LLM_BASE_URL")?,
            timeout,
            temperature: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn test_default_react_config() {
        let config = ReactConfig::default();
        assert_eq!(config.max_steps, 5);
        assert_eq!(config.malformed_policy, MalformedPolicy::Abort);
        assert_eq!(config.bracket_matching, BracketMatching::FirstClose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_steps_rejected() {
        let config = ReactConfig {
            max_steps: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AgentError::InvalidConfig(_))));
    }

    #[test]
    fn test_llm_config_from_lookup() {
        let config = LlmConfig::from_lookup(lookup_from(&[
            ("LLM_MODEL_ID", "gpt-4o-mini"),
            ("LLM_API_KEY", "sk-test"),
            ("LLM_BASE_URL", "https://api.example.com/v1"),
            ("LLM_TIMEOUT", "30"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "https://api.example.com/v1");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.temperature, 0.0);
    }

    #[test]
    fn test_llm_config_missing_key() {
        let err = LlmConfig::from_lookup(lookup_from(&[
            ("LLM_MODEL_ID", "m"),
            ("LLM_BASE_URL", "http://localhost"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("LLM_API_KEY")));
    }

    #[test]
    fn test_llm_config_bad_timeout() {
        let err = LlmConfig::from_lookup(lookup_from(&[
            ("LLM_MODEL_ID", "m"),
            ("LLM_API_KEY", "k"),
            ("LLM_BASE_URL", "http://localhost"),
            ("LLM_TIMEOUT", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "LLM_TIMEOUT", .. }));
    }
}
