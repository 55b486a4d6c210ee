//! Tolk - Terminal Language Translator
//!
//! Entry point: parses arguments, sets up logging and configuration, and
//! dispatches to the one-shot translator or the interactive session.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use tolk::cli::{Args, Commands, ConfigAction};
use tolk::clipboard::{ClipboardSink, SystemClipboard};
use tolk::config::{Config, Provider, DEFAULT_CONFIG_FILE};
use tolk::error::TolkError;
use tolk::language::{self, LANGUAGES};
use tolk::repl;
use tolk::session::SessionController;
use tolk::translate::TranslatorFactory;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Credentials may live in a .env file next to the config; reported once
    // logging is up
    let dotenv = dotenvy::dotenv();

    // Load configuration and apply command line overrides
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(provider) = &args.provider {
        config.translate.provider = Provider::from_str(provider).ok_or_else(|| {
            TolkError::Configuration(format!(
                "Invalid provider '{}'. Valid providers: gemini, ollama",
                provider
            ))
        })?;
    }
    if let Some(model) = &args.model {
        config.translate.model = Some(model.clone());
    }

    // Setup logging to both console and file
    setup_logging(args.verbose, &config.log.directory)?;

    report_dotenv(&dotenv);

    match args.command {
        Commands::Translate { from, to, text } => {
            let from = from.unwrap_or_else(|| config.session.source_language.clone());
            let to = to.unwrap_or_else(|| config.session.target_language.clone());
            for code in [&from, &to] {
                if language::find(code).is_none() {
                    warn!("Language code '{}' is not in the language table, using it as-is", code);
                }
            }

            let text = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    tokio::io::stdin().read_to_string(&mut buffer).await
                        .context("Failed to read text from stdin")?;
                    buffer
                }
            };

            let translator = TranslatorFactory::create(&config.translate)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()));
            spinner.set_message(format!(
                "Translating from {} to {}...",
                language::display_name(&from),
                language::display_name(&to)
            ));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let result = translator.translate(&text, &from, &to).await;
            spinner.finish_and_clear();

            let translated = result?;
            if !translated.is_empty() {
                println!("{}", translated);
            }
        }
        Commands::Session { from, to } => {
            // Same rule as :from/:to, for both flags and config values
            let mut session_config = config.session.clone();
            let from = from.unwrap_or(session_config.source_language);
            let to = to.unwrap_or(session_config.target_language);
            session_config.source_language = language::canonical_code(&from)?.to_string();
            session_config.target_language = language::canonical_code(&to)?.to_string();

            let translator = TranslatorFactory::create(&config.translate)?;
            if !translator.is_configured() {
                warn!(
                    "No API key found in ${}; translations will fail until it is set",
                    config.translate.api_key_env
                );
            }

            let clipboard: Option<Arc<dyn ClipboardSink>> = match SystemClipboard::new() {
                Ok(clipboard) => Some(Arc::new(clipboard)),
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            };

            let session = SessionController::new(Arc::new(translator), &session_config);
            repl::run(session, clipboard).await?;
        }
        Commands::Languages => {
            println!("{:<8} {}", "Code", "Language");
            println!("{}", "-".repeat(32));
            for language in LANGUAGES {
                println!("{:<8} {}", language.code, language.name);
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { path, force } => {
                let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
                if path.exists() && !force {
                    return Err(TolkError::Configuration(format!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    )).into());
                }
                Config::default().save_to_file(&path)?;
                info!("Wrote default configuration to {}", path.display());
                println!("Wrote {}", path.display());
            }
            ConfigAction::Show => {
                let effective = Config {
                    translate: config.translate.resolved(),
                    ..config.clone()
                };
                let content = toml::to_string_pretty(&effective)
                    .context("Failed to serialize configuration")?;
                println!("{}", content);
            }
        },
    }

    Ok(())
}

/// Log the outcome of loading `.env`. Returns true when the file existed but
/// could not be loaded.
fn report_dotenv(result: &dotenvy::Result<PathBuf>) -> bool {
    match result {
        Ok(path) => {
            info!("Loaded environment from {}", path.display());
            false
        }
        Err(e) if e.not_found() => {
            debug!("No .env file found");
            false
        }
        Err(e) => {
            warn!("Failed to load .env file: {}", e);
            true
        }
    }
}

fn setup_logging(verbose: bool, log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(log_dir, "tolk.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    // The console shares the terminal with the panels, so it stays quiet
    // unless asked otherwise.
    let (file_level, console_level) = if verbose {
        (Level::DEBUG, LevelFilter::DEBUG)
    } else {
        (Level::INFO, LevelFilter::WARN)
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_level);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(file_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - level: {}, file: {}",
          file_level, log_dir.join("tolk.log").display());

    Ok(())
}
