//! Line-oriented front end for a [`SessionController`].
//!
//! Plain lines are appended to the source panel. Lines starting with `:` are
//! commands; `::` escapes a literal leading colon.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::clipboard::ClipboardSink;
use crate::error::Result;
use crate::language::LANGUAGES;
use crate::session::{SessionController, SessionState};
use crate::view;

const HELP: &str = "\
Type text to add it to the source panel. Commands:
  :translate, :t    translate the source text
  :swap             swap languages and texts
  :clear            clear both panels
  :copy             copy the translation to the clipboard
  :from CODE        set the source language
  :to CODE          set the target language
  :show             redraw both panels
  :languages        list language codes
  :help             show this help
  :quit, :q         leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Text(String),
    Translate,
    Swap,
    Clear,
    Copy,
    From(String),
    To(String),
    Show,
    Languages,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> SessionCommand {
    if let Some(escaped) = line.strip_prefix("::") {
        return SessionCommand::Text(format!(":{}", escaped));
    }

    let Some(command) = line.trim().strip_prefix(':') else {
        return SessionCommand::Text(line.to_string());
    };

    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default();
    let argument = words.next().map(str::to_string);

    match (name, argument) {
        ("translate" | "t", None) => SessionCommand::Translate,
        ("swap", None) => SessionCommand::Swap,
        ("clear", None) => SessionCommand::Clear,
        ("copy", None) => SessionCommand::Copy,
        ("from", Some(code)) => SessionCommand::From(code),
        ("to", Some(code)) => SessionCommand::To(code),
        ("show", None) => SessionCommand::Show,
        ("languages", None) => SessionCommand::Languages,
        ("help" | "h" | "?", None) => SessionCommand::Help,
        ("quit" | "q" | "exit", None) => SessionCommand::Quit,
        _ => SessionCommand::Unknown(line.trim().to_string()),
    }
}

/// Whether a transition changes what the target side shows.
fn needs_redraw(previous: &SessionState, current: &SessionState) -> bool {
    previous.translated_text != current.translated_text
        || previous.is_translating != current.is_translating
        || previous.last_error != current.last_error
        || previous.copied != current.copied
        || previous.source_language != current.source_language
        || previous.target_language != current.target_language
}

/// Redraw the panels whenever the translation side changes. Source edits
/// are only echoed on `:show`.
async fn render_loop(mut rx: watch::Receiver<SessionState>) {
    let mut previous = rx.borrow_and_update().clone();
    while rx.changed().await.is_ok() {
        let current = rx.borrow_and_update().clone();
        if needs_redraw(&previous, &current) {
            println!("{}", view::render(&current));
        }
        previous = current;
    }
}

fn print_languages() {
    for language in LANGUAGES {
        println!("  {:<6} {}", language.code, language.name);
    }
}

/// Run the session until `:quit` or end of input.
pub async fn run(
    session: SessionController,
    clipboard: Option<Arc<dyn ClipboardSink>>,
) -> Result<()> {
    info!("Session {} started", session.id());
    println!("{}", HELP);
    println!("{}", view::render(&session.snapshot()));

    let renderer = tokio::spawn(render_loop(session.subscribe()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = parse_command(&line);
        debug!("Session command: {:?}", command);

        match command {
            SessionCommand::Text(text) => session.append_source_line(&text),
            SessionCommand::Translate => {
                if session.translate().is_none() {
                    let state = session.snapshot();
                    if state.is_translating {
                        println!("A translation is already in progress.");
                    } else {
                        println!("Nothing to translate.");
                    }
                }
            }
            SessionCommand::Swap => session.swap(),
            SessionCommand::Clear => session.clear(),
            SessionCommand::Copy => match &clipboard {
                Some(clipboard) => {
                    if !session.copy(clipboard.as_ref()) {
                        println!("Nothing copied.");
                    }
                }
                None => println!("Clipboard is not available."),
            },
            SessionCommand::From(code) => {
                if let Err(e) = session.set_source_language(&code) {
                    println!("{} (see :languages)", e);
                }
            }
            SessionCommand::To(code) => {
                if let Err(e) = session.set_target_language(&code) {
                    println!("{} (see :languages)", e);
                }
            }
            SessionCommand::Show => println!("{}", view::render(&session.snapshot())),
            SessionCommand::Languages => print_languages(),
            SessionCommand::Help => println!("{}", HELP),
            SessionCommand::Quit => break,
            SessionCommand::Unknown(input) => println!("Unknown command: {} (see :help)", input),
        }
    }

    renderer.abort();
    info!("Session {} ended", session.id());
    Ok(())
}
