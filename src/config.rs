use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::{Result, TolkError};

/// Default file looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "tolk.toml";

fn default_timeout_secs() -> u64 {
    30
}

fn default_copy_feedback_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub translate: TranslateConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Completion provider to send prompts to
    pub provider: Provider,
    /// Base URL of the provider API (provider default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Model identifier sent with every request (provider default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Environment variable holding the API credential
    pub api_key_env: String,
    /// HTTP request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    /// Google Gemini `generateContent`; needs an API key
    Gemini,
    /// Local Ollama server; no credential
    Ollama,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Language selected for the source panel at startup
    pub source_language: String,
    /// Language selected for the target panel at startup
    pub target_language: String,
    /// How long the copy confirmation stays visible
    #[serde(default = "default_copy_feedback_ms")]
    pub copy_feedback_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Directory for the rolling log file
    pub directory: PathBuf,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Gemini,
            endpoint: None,
            model: None,
            api_key_env: "API_KEY".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            source_language: "en".to_string(),
            target_language: "es".to_string(),
            copy_feedback_ms: default_copy_feedback_ms(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(".tolk").join("log"),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TolkError::Configuration(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| TolkError::Configuration(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TolkError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TolkError::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Explicit path first, then `tolk.toml` in the working directory, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }
}

impl TranslateConfig {
    /// The configured endpoint, or the provider's own.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(self.provider.default_endpoint())
    }

    /// The configured model, or the provider's own.
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(self.provider.default_model())
    }

    /// Copy with the provider defaults written out.
    pub fn resolved(&self) -> Self {
        Self {
            endpoint: Some(self.endpoint().to_string()),
            model: Some(self.model().to_string()),
            ..self.clone()
        }
    }
}

impl Provider {
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::Ollama => "http://localhost:11434",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => "gemini-2.5-flash",
            Self::Ollama => "llama3.2:3b",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Some(Self::Gemini),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }
}
