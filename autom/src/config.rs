//! autom configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::agent::AgentConfig;
use crate::llm::LlmError;

/// Project-local config file name
const LOCAL_CONFIG: &str = ".autom.yml";

/// Main autom configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Conversation loop defaults
    pub agent: AgentDefaults,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that the API key environment variable is set. Call this early in
    /// startup to fail fast with a clear error message.
    pub fn validate(&self) -> Result<()> {
        self.llm.api_key()?;
        Ok(())
    }

    /// Load configuration with fallback chain
    ///
    /// Explicit path, then `./.autom.yml`, then `~/.config/autom/autom.yml`,
    /// then defaults. Only an explicit path is allowed to fail.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::fallback_paths() {
            if !candidate.exists() {
                continue;
            }
            match Self::load_from_file(&candidate) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", candidate.display(), e);
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the log level, before logging is initialized
    ///
    /// Never fails: any problem here resurfaces in [`Config::load`] once
    /// logging is up.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => Self::fallback_paths(),
        };

        candidates
            .iter()
            .filter(|p| p.exists())
            .find_map(|p| fs::read_to_string(p).ok())
            .and_then(|content| serde_yaml::from_str::<Self>(&content).ok())
            .and_then(|config| config.log_level)
    }

    /// Merge command-line overrides into the loop configuration
    pub fn agent_config(&self, overrides: &AgentOverrides) -> Result<AgentConfig> {
        let model = overrides.model.clone().unwrap_or_else(|| self.llm.model.clone());
        let timeout_secs = overrides.shell_timeout_secs.unwrap_or(self.agent.shell_timeout_secs);
        let max_turns = overrides.max_turns.unwrap_or(self.agent.max_turns);

        if timeout_secs == 0 {
            return Err(eyre::eyre!("Shell timeout must be at least 1 second"));
        }
        if max_turns == 0 {
            return Err(eyre::eyre!("max-turns must be at least 1"));
        }

        Ok(AgentConfig {
            model,
            system_prompt: self.agent.system_prompt.clone(),
            shell_timeout: Duration::from_secs(timeout_secs),
            max_turns,
        })
    }

    fn fallback_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("autom").join("autom.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: "openai" (Responses API) or "openai-chat" (Chat Completions)
    pub provider: String,

    /// Default model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum output tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String, LlmError> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey {
                env: self.api_key_env.clone(),
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4.1-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com".to_string(),
            max_tokens: 4096,
            timeout_ms: 120_000,
        }
    }
}

/// Conversation loop defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentDefaults {
    /// Shell command timeout in seconds
    #[serde(rename = "shell-timeout-secs")]
    pub shell_timeout_secs: u64,

    /// Maximum model calls per prompt
    #[serde(rename = "max-turns")]
    pub max_turns: u32,

    /// System instruction sent ahead of every conversation
    #[serde(rename = "system-prompt")]
    pub system_prompt: String,
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            shell_timeout_secs: 30,
            max_turns: 8,
            system_prompt: crate::agent::DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Per-invocation overrides from the command line
#[derive(Debug, Clone, Default)]
pub struct AgentOverrides {
    pub model: Option<String>,
    pub shell_timeout_secs: Option<u64>,
    pub max_turns: Option<u32>,
}
