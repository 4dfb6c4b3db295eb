//! Config commands (saved default template and alphabet).

use anyhow::Result;
use clap::{Args, Subcommand};
use noid_core::{Alphabet, Template};
use serde::Serialize;

use crate::config::config_path;
use crate::error::CliError;
use crate::output::{print_single, print_success, OutputFormat};

use super::CommandContext;

/// Manage the saved defaults.
#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Show the saved config.
    Show,

    /// Print the config file location.
    Path,

    /// Save the given --template and/or --alphabet as defaults.
    Set,

    /// Remove all saved defaults.
    Clear,
}

#[derive(Debug, Serialize)]
struct ConfigView {
    path: String,
    template: Option<String>,
    alphabet: Option<String>,
}

impl ConfigCommand {
    /// Returns true if this command overwrites the config file.
    pub fn rewrites_config(&self) -> bool {
        matches!(
            self.command,
            ConfigSubcommand::Set | ConfigSubcommand::Clear
        )
    }

    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            ConfigSubcommand::Show => show(ctx),
            ConfigSubcommand::Path => {
                println!("{}", config_path()?.display());
                Ok(())
            }
            ConfigSubcommand::Set => set(ctx),
            ConfigSubcommand::Clear => clear(ctx),
        }
    }
}

fn show(ctx: CommandContext) -> Result<()> {
    let view = ConfigView {
        path: config_path()?.display().to_string(),
        template: ctx.config.template.clone(),
        alphabet: ctx.config.alphabet.clone(),
    };

    match ctx.format {
        OutputFormat::Json => print_single(&view),
        OutputFormat::Table => {
            println!("path: {}", view.path);
            println!("template: {}", view.template.as_deref().unwrap_or("-"));
            println!("alphabet: {}", view.alphabet.as_deref().unwrap_or("-"));
        }
    }

    Ok(())
}

fn set(mut ctx: CommandContext) -> Result<()> {
    let template = ctx.template.take();
    let alphabet = ctx.alphabet.take();
    if template.is_none() && alphabet.is_none() {
        return Err(anyhow::anyhow!(
            "Nothing to set. Pass --template and/or --alphabet."
        ));
    }

    if let Some(alphabet) = alphabet {
        ctx.config.alphabet = Some(alphabet);
    }
    if let Some(template) = template {
        ctx.config.template = Some(template);
    }
    check_defaults(&ctx)?;
    ctx.config.save()?;

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({ "ok": true })),
        OutputFormat::Table => print_success("Saved defaults"),
    }

    Ok(())
}

/// Refuse to save a template or alphabet that could never be used.
fn check_defaults(ctx: &CommandContext) -> Result<(), CliError> {
    let alphabet = match ctx.config.alphabet.as_deref() {
        Some(symbols) => Alphabet::new(symbols)?,
        None => Alphabet::default(),
    };
    if let Some(template) = ctx.config.template.as_deref() {
        Template::with_alphabet(template, alphabet)?;
    }
    Ok(())
}

fn clear(mut ctx: CommandContext) -> Result<()> {
    ctx.config.template = None;
    ctx.config.alphabet = None;
    ctx.config.save()?;

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({ "ok": true })),
        OutputFormat::Table => print_success("Cleared saved defaults"),
    }

    Ok(())
}
