// Test doubles for the completion backend and the clipboard.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::clipboard::ClipboardSink;
use crate::error::{Result, TolkError};
use crate::translate::CompletionBackend;

/// Prompts seen by a [`MockBackend`], shared with the test body.
#[derive(Clone, Default)]
pub struct CallLog {
    prompts: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

enum Reply {
    Text(String),
    Fail(String),
}

pub struct MockBackend {
    reply: Reply,
    credential: bool,
    gate: Option<Arc<Notify>>,
    log: CallLog,
}

impl MockBackend {
    pub fn replying(text: &str) -> Self {
        Self::with_reply(Reply::Text(text.to_string()))
    }

    pub fn failing(cause: &str) -> Self {
        Self::with_reply(Reply::Fail(cause.to_string()))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            credential: true,
            gate: None,
            log: CallLog::default(),
        }
    }

    pub fn without_credential(mut self) -> Self {
        self.credential = false;
        self
    }

    /// Hold every call open until the returned handle is notified.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn calls(&self) -> CallLog {
        self.log.clone()
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn requires_credential(&self) -> bool {
        true
    }

    fn has_credential(&self) -> bool {
        self.credential
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.log.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(cause) => Err(TolkError::Translation(cause.clone())),
        }
    }
}

#[derive(Default)]
pub struct MockClipboard {
    pub contents: Mutex<Option<String>>,
    pub broken: bool,
}

impl MockClipboard {
    pub fn broken() -> Self {
        Self {
            contents: Mutex::new(None),
            broken: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

impl ClipboardSink for MockClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        if self.broken {
            return Err(TolkError::Clipboard("no display".to_string()));
        }
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}
