use serde::Serialize;

use crate::error::{Result, TolkError};

/// A selectable language: a short code and the name shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

const fn lang(code: &'static str, name: &'static str) -> Language {
    Language { code, name }
}

/// Supported languages, in the order they are offered for selection.
pub static LANGUAGES: &[Language] = &[
    lang("en", "English"),
    lang("es", "Spanish"),
    lang("fr", "French"),
    lang("de", "German"),
    lang("it", "Italian"),
    lang("pt", "Portuguese"),
    lang("nl", "Dutch"),
    lang("ru", "Russian"),
    lang("uk", "Ukrainian"),
    lang("pl", "Polish"),
    lang("cs", "Czech"),
    lang("sv", "Swedish"),
    lang("da", "Danish"),
    lang("no", "Norwegian"),
    lang("fi", "Finnish"),
    lang("el", "Greek"),
    lang("tr", "Turkish"),
    lang("ar", "Arabic"),
    lang("he", "Hebrew"),
    lang("hi", "Hindi"),
    lang("bn", "Bengali"),
    lang("th", "Thai"),
    lang("vi", "Vietnamese"),
    lang("id", "Indonesian"),
    lang("ms", "Malay"),
    lang("zh", "Chinese (Simplified)"),
    lang("zh-TW", "Chinese (Traditional)"),
    lang("ja", "Japanese"),
    lang("ko", "Korean"),
    lang("sw", "Swahili"),
];

/// Look up a language by code. Codes compare ASCII case-insensitively.
pub fn find(code: &str) -> Option<&'static Language> {
    LANGUAGES
        .iter()
        .find(|language| language.code.eq_ignore_ascii_case(code))
}

/// Display name for a code, or the code itself when the table has no entry.
pub fn display_name(code: &str) -> &str {
    match find(code) {
        Some(language) => language.name,
        None => code,
    }
}

/// The table's spelling of `code`, or `UnknownLanguage` when it is not offered.
pub fn canonical_code(code: &str) -> Result<&'static str> {
    find(code)
        .map(|language| language.code)
        .ok_or_else(|| TolkError::UnknownLanguage(code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_known_codes() {
        assert_eq!(display_name("en"), "English");
        assert_eq!(display_name("es"), "Spanish");
        assert_eq!(display_name("zh-tw"), "Chinese (Traditional)");
    }

    #[test]
    fn test_display_name_falls_back_to_code() {
        assert_eq!(display_name("tlh"), "tlh");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_canonical_code() {
        assert_eq!(canonical_code("JA").unwrap(), "ja");
        assert_eq!(canonical_code("zh-tw").unwrap(), "zh-TW");
        assert!(matches!(canonical_code("xx"), Err(TolkError::UnknownLanguage(code)) if code == "xx"));
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in LANGUAGES.iter().enumerate() {
            for b in &LANGUAGES[i + 1..] {
                assert!(!a.code.eq_ignore_ascii_case(b.code), "duplicate code {}", a.code);
            }
        }
    }
}
