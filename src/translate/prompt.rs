use crate::language;

/// Build the single instruction prompt for translating `text`.
///
/// Both codes are resolved to display names; a code missing from the language
/// table is used as-is. The text is embedded verbatim.
pub fn build_translation_prompt(text: &str, source_code: &str, target_code: &str) -> String {
    let source_name = language::display_name(source_code);
    let target_name = language::display_name(target_code);

    format!(
        "You are an expert translator. Translate the following text from {} to {}. \
         Do not add any commentary, explanations, or quotes around the translation. \
         Respond ONLY with the translated text.\n\
         \n\
         Text to translate:\n\
         \"{}\"\n",
        source_name, target_name, text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_uses_display_names() {
        let prompt = build_translation_prompt("Hello", "en", "es");
        assert!(prompt.contains("from English to Spanish"));
        assert!(!prompt.contains("from en to es"));
    }

    #[test]
    fn test_prompt_falls_back_to_raw_code() {
        let prompt = build_translation_prompt("Hello", "en", "tlh");
        assert!(prompt.contains("from English to tlh"));
    }

    #[test]
    fn test_prompt_embeds_text_verbatim() {
        let text = "  line one\nline \"two\"  ";
        let prompt = build_translation_prompt(text, "fr", "de");
        assert!(prompt.contains(&format!("\"{}\"", text)));
        assert!(prompt.contains("Respond ONLY with the translated text."));
    }
}
