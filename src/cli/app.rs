use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use super::commands::{
    links::LinksCommand, list::ListCommand, resolve::ResolveCommand, validate::ValidateCommand,
    CommandHandler,
};
use crate::config::DEFAULT_CONFIG_FILE;

/// Inspect and validate documentation resource collections
#[derive(Parser, Debug)]
#[command(name = "resource-collections")]
#[command(version)]
#[command(about = "Inspect and validate documentation resource collections")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file listing collection sources
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Set log level
    #[arg(long, global = true, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load every configured source and report problems
    Validate {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Resolve a collection id, with locale fallback
    Resolve {
        /// Base collection id, e.g. index/primary
        id: String,

        /// Locale suffix or language tag, e.g. zhcn or zh-CN
        #[arg(short, long)]
        locale: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List collection ids in source order
    List {
        /// Only ids starting with this literal prefix
        prefix: Option<String>,
    },

    /// List every referenced resource, for link checking
    Links {
        /// Only collections whose id starts with this literal prefix
        prefix: Option<String>,

        /// Only absolute http(s) references
        #[arg(long)]
        external_only: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Validate { .. } => "validate",
            Commands::Resolve { .. } => "resolve",
            Commands::List { .. } => "list",
            Commands::Links { .. } => "links",
        }
    }

    /// Build the handler for this command
    pub fn into_handler(self, config: PathBuf) -> Box<dyn CommandHandler> {
        match self {
            Commands::Validate { format } => Box::new(ValidateCommand::new(config, format)),
            Commands::Resolve { id, locale, format } => {
                Box::new(ResolveCommand::new(config, id, locale, format))
            }
            Commands::List { prefix } => Box::new(ListCommand::new(config, prefix)),
            Commands::Links {
                prefix,
                external_only,
            } => Box::new(LinksCommand::new(config, prefix, external_only)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::parse_from([
            "resource-collections",
            "resolve",
            "index/primary",
            "--locale",
            "zh-CN",
            "--config",
            "site/collections.yaml",
        ]);
        assert_eq!(cli.config, PathBuf::from("site/collections.yaml"));
        assert_eq!(cli.command.name(), "resolve");
        match cli.command {
            Commands::Resolve { id, locale, format } => {
                assert_eq!(id, "index/primary");
                assert_eq!(locale.as_deref(), Some("zh-CN"));
                assert_eq!(format, OutputFormat::Text);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["resource-collections", "list"]);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(cli.log_level, LogLevel::Warn);
    }
}
