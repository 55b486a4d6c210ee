use tracing::{debug, error, info};

use crate::error::{Result, TolkError};
use super::CompletionBackend;
use super::prompt::build_translation_prompt;

/// One translate action's input. Built per action and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

/// Turns a translation request into exactly one completion call.
pub struct Translator {
    backend: Box<dyn CompletionBackend>,
}

impl Translator {
    pub fn new(backend: Box<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// False when the backend needs a credential that was not found.
    pub fn is_configured(&self) -> bool {
        !self.backend.requires_credential() || self.backend.has_credential()
    }

    /// Translate `text` from `source_code` to `target_code`.
    ///
    /// Blank input returns an empty string without contacting the backend. Any
    /// backend failure is logged and replaced by a generic
    /// [`TolkError::Translation`].
    pub async fn translate(&self, text: &str, source_code: &str, target_code: &str) -> Result<String> {
        if !self.is_configured() {
            return Err(TolkError::Configuration(format!(
                "API key not found. Please set the credential for the {} provider.",
                self.backend.name()
            )));
        }

        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let prompt = build_translation_prompt(text, source_code, target_code);
        debug!("Translating {} characters {} -> {}", text.chars().count(), source_code, target_code);

        match self.backend.complete(&prompt).await {
            Ok(response) => {
                info!("Translation complete ({} -> {})", source_code, target_code);
                Ok(response.trim().to_string())
            }
            Err(e) => {
                error!("{} API call failed: {}", self.backend.name(), e);
                Err(TolkError::translation_failed())
            }
        }
    }

    pub async fn translate_request(&self, request: &TranslationRequest) -> Result<String> {
        self.translate(&request.text, &request.source_language, &request.target_language)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TRANSLATION_FAILED;
    use crate::testing::MockBackend;

    #[tokio::test]
    async fn test_blank_text_skips_backend() {
        let backend = MockBackend::replying("unused");
        let calls = backend.calls();
        let translator = Translator::new(Box::new(backend));

        for text in ["", "   ", "\n\t "] {
            assert_eq!(translator.translate(text, "en", "es").await.unwrap(), "");
        }
        assert_eq!(calls.count(), 0);
    }

    #[tokio::test]
    async fn test_result_is_trimmed() {
        let backend = MockBackend::replying("\n  Hola  \n");
        let translator = Translator::new(Box::new(backend));

        assert_eq!(translator.translate("Hello", "en", "es").await.unwrap(), "Hola");
    }

    #[tokio::test]
    async fn test_prompt_carries_display_names() {
        let backend = MockBackend::replying("Bonjour");
        let calls = backend.calls();
        let translator = Translator::new(Box::new(backend));

        translator.translate("Hello", "en", "fr").await.unwrap();

        let prompts = calls.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("from English to French"));
        assert!(prompts[0].contains("\"Hello\""));
    }

    #[tokio::test]
    async fn test_unknown_code_still_translates() {
        let backend = MockBackend::replying("nuqneH");
        let calls = backend.calls();
        let translator = Translator::new(Box::new(backend));

        let result = translator.translate("Hello", "en", "tlh").await.unwrap();
        assert_eq!(result, "nuqneH");
        assert!(calls.prompts()[0].contains("to tlh"));
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_generic_error() {
        let backend = MockBackend::failing("HTTP 503: upstream exploded");
        let translator = Translator::new(Box::new(backend));

        let err = translator.translate("Hello", "en", "es").await.unwrap_err();
        match err {
            TolkError::Translation(message) => assert_eq!(message, TRANSLATION_FAILED),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_any_call() {
        let backend = MockBackend::replying("Hola").without_credential();
        let calls = backend.calls();
        let translator = Translator::new(Box::new(backend));

        assert!(!translator.is_configured());
        let err = translator.translate("Hello", "en", "es").await.unwrap_err();
        assert!(matches!(err, TolkError::Configuration(_)));
        let err = translator.translate("", "en", "es").await.unwrap_err();
        assert!(matches!(err, TolkError::Configuration(_)));
        assert_eq!(calls.count(), 0);
    }

    #[tokio::test]
    async fn test_translate_request() {
        let translator = Translator::new(Box::new(MockBackend::replying("Hallo")));
        let request = TranslationRequest {
            text: "Hello".to_string(),
            source_language: "en".to_string(),
            target_language: "de".to_string(),
        };

        assert_eq!(translator.translate_request(&request).await.unwrap(), "Hallo");
    }
}
