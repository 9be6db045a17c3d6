//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config;

/// Build version string with git hash and build date.
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// Directives - inspect and drive prompt directives in a prompt set
#[derive(Parser, Debug)]
#[command(name = "directives")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Prompt-set JSON document
    #[arg(short, long, env = "DIRECTIVES_FILE", global = true)]
    pub file: Option<String>,

    /// Active backend API, matched against @if-api
    #[arg(long, env = "DIRECTIVES_API", global = true)]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List prompts with their state
    List {
        /// Include prompts hidden by their display conditions
        #[arg(short, long)]
        all: bool,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the parsed directives of a prompt
    Show {
        /// Prompt identifier
        #[arg(required = true)]
        prompt: String,
    },

    /// Report the issues enabling a prompt would raise
    Validate {
        /// Prompt identifier
        #[arg(required = true)]
        prompt: String,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    /// Enable a prompt, resolving conflicts where its directives allow
    Enable {
        /// Prompt identifier
        #[arg(required = true)]
        prompt: String,

        /// Proceed past issues without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Disable a prompt
    Disable {
        /// Prompt identifier
        #[arg(required = true)]
        prompt: String,
    },

    /// Evaluate message triggers
    Triggers {
        /// Message count to evaluate (default: stored count)
        #[arg(short, long)]
        count: Option<u32>,

        /// Report transitions without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Advance the message count and apply triggers
    Advance {
        /// Number of messages to add
        #[arg(short, long, default_value_t = 1)]
        by: u32,
    },
}

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Cli {
    /// Returns the prompt-set path, using the default if not specified.
    pub fn prompts_file(&self) -> PathBuf {
        self.file
            .as_deref()
            .map(config::expand)
            .unwrap_or_else(config::default_prompts_file)
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parse_enable() {
        let cli = Cli::parse_from(["directives", "enable", "pacing-slow", "--yes"]);
        match cli.command {
            Commands::Enable { prompt, yes } => {
                assert_eq!(prompt, "pacing-slow");
                assert!(yes);
            }
            _ => panic!("Expected Enable command"),
        }
    }

    #[test]
    fn test_cli_parse_triggers() {
        let cli = Cli::parse_from(["directives", "triggers", "--count", "12", "--dry-run"]);
        match cli.command {
            Commands::Triggers { count, dry_run } => {
                assert_eq!(count, Some(12));
                assert!(dry_run);
            }
            _ => panic!("Expected Triggers command"),
        }
    }

    #[test]
    fn test_cli_parse_advance_default() {
        let cli = Cli::parse_from(["directives", "advance"]);
        assert!(matches!(cli.command, Commands::Advance { by: 1 }));
    }

    #[test]
    fn test_cli_global_file_flag() {
        let cli = Cli::parse_from([
            "directives",
            "list",
            "--file",
            "/tmp/p.json",
            "--format",
            "json",
        ]);
        assert_eq!(cli.prompts_file(), PathBuf::from("/tmp/p.json"));
        assert!(matches!(
            cli.command,
            Commands::List { all: false, format: OutputFormat::Json }
        ));
    }

    #[test]
    fn test_cli_log_level() {
        let cli = Cli::parse_from(["directives", "-vv", "list"]);
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["directives"]).is_err());
    }
}
