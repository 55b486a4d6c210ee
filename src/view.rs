use std::fmt::Write;

use crate::language;
use crate::session::{SessionState, SessionStatus};

const RULE_WIDTH: usize = 48;

const SOURCE_PLACEHOLDER: &str = "Enter text to translate...";
const TARGET_PLACEHOLDER: &str = "Translation will appear here...";

/// Render both panels, the error banner and the translate trigger.
pub fn render(state: &SessionState) -> String {
    let mut out = String::new();

    let source_name = language::display_name(&state.source_language);
    let target_name = language::display_name(&state.target_language);

    panel_header(&mut out, source_name, None);
    panel_body(&mut out, &state.source_text, SOURCE_PLACEHOLDER);
    let _ = writeln!(out, "{:>width$}", char_count(state.source_char_count()), width = RULE_WIDTH);

    let marker = if state.copied {
        Some("Copied!")
    } else if state.is_translating {
        Some("Translating...")
    } else {
        None
    };
    panel_header(&mut out, target_name, marker);
    if !state.is_translating {
        panel_body(&mut out, &state.translated_text, TARGET_PLACEHOLDER);
    }
    let _ = writeln!(out, "{:>width$}", char_count(state.translated_char_count()), width = RULE_WIDTH);

    if let Some(error) = &state.last_error {
        let _ = writeln!(out, "! {}", error);
    }

    let trigger = match state.status() {
        SessionStatus::Translating => "[ Translating... ]",
        _ if state.can_translate() => "[ Translate ]",
        _ => "[ Translate ] (enter some text first)",
    };
    let _ = writeln!(out, "{}", trigger);

    out
}

fn panel_header(out: &mut String, language_name: &str, marker: Option<&str>) {
    let title = match marker {
        Some(marker) => format!("-- {} ({}) ", language_name, marker),
        None => format!("-- {} ", language_name),
    };
    let fill = RULE_WIDTH.saturating_sub(title.chars().count());
    let _ = writeln!(out, "{}{}", title, "-".repeat(fill));
}

fn panel_body(out: &mut String, text: &str, placeholder: &str) {
    if text.is_empty() {
        let _ = writeln!(out, "  ({})", placeholder);
    } else {
        for line in text.lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }
}

fn char_count(count: usize) -> String {
    if count == 1 {
        "1 character".to_string()
    } else {
        format!("{} characters", count)
    }
}
