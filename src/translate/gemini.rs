use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TranslateConfig;
use crate::error::{Result, TolkError};
use super::CompletionBackend;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Google Gemini `generateContent` client
pub struct GeminiBackend {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiBackend {
    pub fn new(config: &TranslateConfig, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            client: super::http_client(config.timeout_secs)?,
            endpoint: config.endpoint().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl CompletionBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    fn requires_credential(&self) -> bool {
        true
    }

    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            TolkError::Configuration("Gemini API key is not set".to_string())
        })?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let url = self.url();
        debug!("Sending completion request to: {}", url);

        let response = self.client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TolkError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TolkError::Translation(format!(
                "Gemini API error {}: {}", status, error_text
            )));
        }

        let body: GenerateContentResponse = response.json().await
            .map_err(|e| TolkError::Translation(format!("Failed to parse response: {}", e)))?;

        extract_text(body)
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(body: GenerateContentResponse) -> Result<String> {
    let parts = body
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .ok_or_else(|| TolkError::Translation("Response contained no candidates".to_string()))?;

    let texts: Vec<String> = parts.into_iter().filter_map(|part| part.text).collect();
    if texts.is_empty() {
        return Err(TolkError::Translation("Response contained no text".to_string()));
    }

    Ok(texts.concat())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<String> {
        extract_text(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_request_body_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: "hi" }],
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]}));
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let text = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"Ho"},{"text":"la\n"}],"role":"model"},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(text, "Hola\n");
    }

    #[test]
    fn test_extract_text_without_candidates() {
        assert!(matches!(parse(r#"{"promptFeedback":{}}"#), Err(TolkError::Translation(_))));
    }

    #[test]
    fn test_extract_text_without_text_parts() {
        let result = parse(r#"{"candidates":[{"content":{"parts":[{"inlineData":{}}]}}]}"#);
        assert!(matches!(result, Err(TolkError::Translation(_))));
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let mut config = TranslateConfig::default();
        config.endpoint = Some("https://example.test/".to_string());
        let backend = GeminiBackend::new(&config, None).unwrap();
        assert_eq!(
            backend.url(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert!(!backend.has_credential());
    }
}
