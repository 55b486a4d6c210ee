use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TranslateConfig;
use crate::error::{Result, TolkError};
use super::CompletionBackend;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

/// Local Ollama server client
pub struct OllamaBackend {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaBackend {
    pub fn new(config: &TranslateConfig) -> Result<Self> {
        Ok(Self {
            client: super::http_client(config.timeout_secs)?,
            endpoint: config.endpoint().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
        })
    }
}

#[async_trait]
impl CompletionBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let url = format!("{}/api/generate", self.endpoint);
        debug!("Sending completion request to: {}", url);

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TolkError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TolkError::Translation(format!(
                "Ollama API error {}: {}", status, error_text
            )));
        }

        let generated: GenerateResponse = response.json().await
            .map_err(|e| TolkError::Translation(format!("Failed to parse response: {}", e)))?;

        Ok(generated.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_disables_streaming() {
        let request = GenerateRequest {
            model: "llama3.2:3b".to_string(),
            prompt: "p".to_string(),
            stream: false,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["stream"], serde_json::json!(false));
        assert_eq!(value["model"], "llama3.2:3b");
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"response":" Hola ","done":true,"eval_count":3}"#).unwrap();
        assert_eq!(response.response, " Hola ");
    }

    #[test]
    fn test_backend_uses_local_defaults_for_ollama() {
        let mut config = TranslateConfig::default();
        config.provider = crate::config::Provider::Ollama;
        let backend = OllamaBackend::new(&config).unwrap();
        assert_eq!(backend.endpoint, "http://localhost:11434");
        assert_eq!(backend.model, "llama3.2:3b");
    }
}
