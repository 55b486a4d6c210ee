// Translation adapter and the completion providers behind it.
//
// The adapter (`Translator`) owns prompt construction and error shaping; the
// providers only move a prompt string to a model and a response string back:
// - Gemini: Google `generateContent`, authenticated by an API key
// - Ollama: local `/api/generate`, no credential

pub mod adapter;
pub mod gemini;
pub mod ollama;
pub mod prompt;

use async_trait::async_trait;
use std::time::Duration;

pub use adapter::{TranslationRequest, Translator};
use crate::config::{Provider, TranslateConfig};
use crate::error::{Result, TolkError};

/// A text-completion service: send a prompt, receive text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &str;

    /// Whether `complete` cannot work without a credential
    fn requires_credential(&self) -> bool {
        false
    }

    /// Whether a credential was found when the backend was built
    fn has_credential(&self) -> bool {
        false
    }

    /// Issue a single completion request
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Build a translator for the configured provider. The credential is read
    /// from the environment here, once.
    pub fn create(config: &TranslateConfig) -> Result<Translator> {
        let backend: Box<dyn CompletionBackend> = match config.provider {
            Provider::Gemini => {
                let api_key = std::env::var(&config.api_key_env)
                    .ok()
                    .filter(|key| !key.trim().is_empty());
                Box::new(gemini::GeminiBackend::new(config, api_key)?)
            }
            Provider::Ollama => Box::new(ollama::OllamaBackend::new(config)?),
        };

        Ok(Translator::new(backend))
    }
}

/// Shared HTTP client construction for the providers.
pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| TolkError::Configuration(format!("Failed to create HTTP client: {}", e)))
}
