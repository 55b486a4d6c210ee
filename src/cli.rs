use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Completion provider (gemini or ollama), overriding the config file
    #[arg(long)]
    pub provider: Option<String>,

    /// Model identifier, overriding the config file
    #[arg(long)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a piece of text and print the result
    Translate {
        /// Source language code
        #[arg(short, long)]
        from: Option<String>,

        /// Target language code
        #[arg(short, long)]
        to: Option<String>,

        /// Text to translate (read from stdin when omitted)
        text: Option<String>,
    },

    /// Start an interactive translation session
    Session {
        /// Source language code
        #[arg(short, long)]
        from: Option<String>,

        /// Target language code
        #[arg(short, long)]
        to: Option<String>,
    },

    /// List supported languages
    Languages,

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write the default configuration
    Init {
        /// Destination (default: tolk.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translate() {
        let args = Args::parse_from(["tolk", "-v", "translate", "-f", "en", "-t", "ja", "Hello"]);
        assert!(args.verbose);
        match args.command {
            Commands::Translate { from, to, text } => {
                assert_eq!(from.as_deref(), Some("en"));
                assert_eq!(to.as_deref(), Some("ja"));
                assert_eq!(text.as_deref(), Some("Hello"));
            }
            _ => panic!("expected translate"),
        }
    }

    #[test]
    fn test_parse_config_init() {
        let args = Args::parse_from(["tolk", "--provider", "ollama", "config", "init", "--force"]);
        assert_eq!(args.provider.as_deref(), Some("ollama"));
        assert!(matches!(
            args.command,
            Commands::Config { action: ConfigAction::Init { path: None, force: true } }
        ));
    }
}
