//! Interactive session state and the controller that drives it.
//!
//! The controller is the only writer of [`SessionState`]. Every transition is
//! applied inside one `watch` update, so subscribers see swaps and translate
//! starts as single changes. A translate action runs on its own task; while it
//! is outstanding further translate actions are ignored.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

use crate::clipboard::ClipboardSink;
use crate::config::SessionConfig;
use crate::error::Result;
use crate::language;
use crate::translate::{TranslationRequest, Translator};

/// Shown to the user whenever a translation attempt fails, whatever the cause.
pub const TRANSLATE_ERROR_MESSAGE: &str = "An error occurred during translation. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub source_language: String,
    pub target_language: String,
    pub source_text: String,
    pub translated_text: String,
    pub is_translating: bool,
    pub last_error: Option<String>,
    /// Copy confirmation for the target panel
    pub copied: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Translating,
    Error,
}

impl SessionState {
    pub fn new(source_language: &str, target_language: &str) -> Self {
        Self {
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            source_text: String::new(),
            translated_text: String::new(),
            is_translating: false,
            last_error: None,
            copied: false,
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_translating {
            SessionStatus::Translating
        } else if self.last_error.is_some() {
            SessionStatus::Error
        } else {
            SessionStatus::Idle
        }
    }

    /// Whether the translate trigger is enabled.
    pub fn can_translate(&self) -> bool {
        !self.is_translating && !self.source_text.trim().is_empty()
    }

    pub fn source_char_count(&self) -> usize {
        self.source_text.chars().count()
    }

    pub fn translated_char_count(&self) -> usize {
        self.translated_text.chars().count()
    }
}

struct Shared {
    state: watch::Sender<SessionState>,
    copy_timer: Mutex<Option<JoinHandle<()>>>,
}

impl Shared {
    /// Apply one transition. `apply` reports whether it changed anything;
    /// subscribers are only notified when it did. A change of the translated
    /// text drops the copy confirmation and its pending reset.
    fn update<F>(&self, apply: F) -> bool
    where
        F: FnOnce(&mut SessionState) -> bool,
    {
        let mut text_changed = false;
        let modified = self.state.send_if_modified(|state| {
            let previous = state.translated_text.clone();
            let modified = apply(state);
            if state.translated_text != previous {
                text_changed = true;
                state.copied = false;
            }
            modified || text_changed
        });

        if text_changed {
            self.cancel_copy_timer();
        }
        modified
    }

    fn replace_copy_timer(&self, handle: JoinHandle<()>) {
        let mut timer = self.copy_timer.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = timer.replace(handle) {
            previous.abort();
        }
    }

    fn cancel_copy_timer(&self) {
        let mut timer = self.copy_timer.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = timer.take() {
            previous.abort();
        }
    }
}

/// Owns one session's state and performs the user's actions on it.
pub struct SessionController {
    id: Uuid,
    span: Span,
    shared: Arc<Shared>,
    translator: Arc<Translator>,
    copy_feedback: Duration,
}

impl SessionController {
    pub fn new(translator: Arc<Translator>, config: &SessionConfig) -> Self {
        let id = Uuid::new_v4();
        let span = info_span!("session", id = %id);
        let (state, _) = watch::channel(SessionState::new(
            &config.source_language,
            &config.target_language,
        ));

        Self {
            id,
            span,
            shared: Arc::new(Shared {
                state,
                copy_timer: Mutex::new(None),
            }),
            translator,
            copy_feedback: Duration::from_millis(config.copy_feedback_ms),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn snapshot(&self) -> SessionState {
        self.shared.state.borrow().clone()
    }

    /// Receive every state transition from now on.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.shared.state.subscribe()
    }

    pub fn set_source_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.shared.update(|state| {
            if state.source_text == text {
                return false;
            }
            state.source_text = text;
            true
        });
    }

    /// Append a line to the source text, separated by a newline.
    pub fn append_source_line(&self, line: &str) {
        self.shared.update(|state| {
            if !state.source_text.is_empty() {
                state.source_text.push('\n');
            }
            state.source_text.push_str(line);
            true
        });
    }

    /// Select a source language. Only codes from the language table are offered.
    pub fn set_source_language(&self, code: &str) -> Result<()> {
        let code = language::canonical_code(code)?;
        self.shared.update(|state| {
            let changed = state.source_language != code;
            state.source_language = code.to_string();
            changed
        });
        Ok(())
    }

    /// Select a target language. Only codes from the language table are offered.
    pub fn set_target_language(&self, code: &str) -> Result<()> {
        let code = language::canonical_code(code)?;
        self.shared.update(|state| {
            let changed = state.target_language != code;
            state.target_language = code.to_string();
            changed
        });
        Ok(())
    }

    /// Start translating the current source text.
    ///
    /// Returns the handle of the spawned request, or `None` when nothing was
    /// dispatched: a request is already outstanding, or the source is blank (in
    /// which case the translated text is emptied). Must be called within a
    /// tokio runtime.
    pub fn translate(&self) -> Option<JoinHandle<()>> {
        let mut request = None;
        self.shared.update(|state| {
            if state.is_translating {
                debug!(parent: &self.span, "Translate ignored: request already in flight");
                return false;
            }
            if state.source_text.trim().is_empty() {
                state.translated_text.clear();
                return false;
            }

            state.is_translating = true;
            state.last_error = None;
            state.translated_text.clear();
            request = Some(TranslationRequest {
                text: state.source_text.clone(),
                source_language: state.source_language.clone(),
                target_language: state.target_language.clone(),
            });
            true
        });

        let request = request?;
        let shared = self.shared.clone();
        let translator = self.translator.clone();

        let task = async move {
            info!(
                "Translating {} -> {}",
                request.source_language, request.target_language
            );
            let result = translator.translate_request(&request).await;

            shared.update(|state| {
                state.is_translating = false;
                match result {
                    Ok(text) => {
                        state.translated_text = text;
                        state.last_error = None;
                    }
                    Err(e) => {
                        warn!("Translation failed: {}", e);
                        state.last_error = Some(TRANSLATE_ERROR_MESSAGE.to_string());
                    }
                }
                true
            });
        };

        Some(tokio::spawn(task.instrument(self.span.clone())))
    }

    /// Exchange languages and texts in one step.
    pub fn swap(&self) {
        self.shared.update(|state| {
            std::mem::swap(&mut state.source_language, &mut state.target_language);
            std::mem::swap(&mut state.source_text, &mut state.translated_text);
            true
        });
    }

    /// Empty both panels and drop any error.
    pub fn clear(&self) {
        self.shared.update(|state| {
            let changed = !state.source_text.is_empty()
                || !state.translated_text.is_empty()
                || state.last_error.is_some();
            state.source_text.clear();
            state.translated_text.clear();
            state.last_error = None;
            changed
        });
    }

    /// Copy the translated text and show the confirmation for a while.
    ///
    /// Returns false when there is nothing to copy, the clipboard refused the
    /// write, or the translated text changed before the write finished. Must be
    /// called within a tokio runtime.
    pub fn copy(&self, clipboard: &dyn ClipboardSink) -> bool {
        let text = self.shared.state.borrow().translated_text.clone();
        if text.is_empty() {
            return false;
        }

        if let Err(e) = clipboard.set_text(&text) {
            warn!(parent: &self.span, "Copy to clipboard failed: {}", e);
            return false;
        }

        let mut still_current = false;
        self.shared.update(|state| {
            // a result may have landed while the clipboard was being written
            if state.translated_text != text {
                return false;
            }
            still_current = true;
            let changed = !state.copied;
            state.copied = true;
            changed
        });
        if !still_current {
            debug!(parent: &self.span, "Translated text changed during copy, no confirmation shown");
            return false;
        }

        let shared = self.shared.clone();
        let delay = self.copy_feedback;
        let reset = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shared.state.send_if_modified(|state| std::mem::replace(&mut state.copied, false));
        });
        self.shared.replace_copy_timer(reset);
        true
    }
}
