//! Tolk - Terminal Language Translator
//!
//! Translates text between languages by prompting a generative-language API,
//! with an interactive two-panel session on top.

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod language;
pub mod repl;
pub mod session;
pub mod translate;
pub mod view;

#[cfg(test)]
mod testing;
