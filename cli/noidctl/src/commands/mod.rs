//! CLI commands.

mod checkdigit;
mod config;
mod decode;
mod inspect;
mod mint;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use noid_core::{Alphabet, Template};

use crate::config::Config;
use crate::error::CliError;
use crate::output::OutputFormat;

/// noid - Mint and validate opaque identifiers from a template.
#[derive(Debug, Parser)]
#[command(name = "noid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Identifier template, e.g. `bc.sdk`.
    #[arg(long, short, global = true, env = "NOID_TEMPLATE")]
    template: Option<String>,

    /// Alphabet symbols; the first ten must be the digits 0-9.
    #[arg(long, global = true, env = "NOID_ALPHABET")]
    alphabet: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show how a template is parsed and how many identifiers it holds.
    Inspect(inspect::InspectCommand),

    /// Mint identifiers for the given sequence values.
    Mint(mint::MintCommand),

    /// Check whether identifiers belong to the template.
    Validate(validate::ValidateCommand),

    /// Recover the sequence value of identifiers.
    Decode(decode::DecodeCommand),

    /// Compute the check symbol of a string.
    Checkdigit(checkdigit::CheckdigitCommand),

    /// Show or change the saved defaults.
    Config(config::ConfigCommand),
}

impl Commands {
    fn rewrites_config(&self) -> bool {
        match self {
            Commands::Config(cmd) => cmd.rewrites_config(),
            _ => false,
        }
    }
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let config = if self.command.rewrites_config() {
            Config::load_or_default()?
        } else {
            Config::load()?
        };

        let ctx = CommandContext {
            config,
            format: OutputFormat::from_flag(&self.format),
            template: self.template,
            alphabet: self.alphabet,
        };

        match self.command {
            Commands::Inspect(cmd) => cmd.run(ctx),
            Commands::Mint(cmd) => cmd.run(ctx),
            Commands::Validate(cmd) => cmd.run(ctx),
            Commands::Decode(cmd) => cmd.run(ctx),
            Commands::Checkdigit(cmd) => cmd.run(ctx),
            Commands::Config(cmd) => cmd.run(ctx),
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
    pub template: Option<String>,
    pub alphabet: Option<String>,
}

impl CommandContext {
    /// Resolve the template string, preferring flag over config.
    pub fn resolve_template(&self) -> Option<&str> {
        self.template.as_deref().or(self.config.template.as_deref())
    }

    /// Resolve the alphabet, preferring flag over config.
    pub fn resolve_alphabet(&self) -> Result<Alphabet, CliError> {
        match self.alphabet.as_deref().or(self.config.alphabet.as_deref()) {
            Some(symbols) => Ok(Alphabet::new(symbols)?),
            None => Ok(Alphabet::default()),
        }
    }

    /// Build the template engine from the resolved settings.
    pub fn require_template(&self) -> Result<Template, CliError> {
        let raw = self.resolve_template().ok_or(CliError::NoTemplate)?;
        let alphabet = self.resolve_alphabet()?;
        Ok(Template::with_alphabet(raw, alphabet)?)
    }
}

#[cfg(test)]
pub(crate) fn test_context(template: Option<&str>) -> CommandContext {
    CommandContext {
        config: Config::default(),
        format: OutputFormat::Json,
        template: template.map(str::to_string),
        alphabet: None,
    }
}
