//! Checkdigit command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::error::CliError;
use crate::output::{print_single, OutputFormat};

use super::CommandContext;

/// Checkdigit command - compute the check symbol of a string.
///
/// Only the alphabet is needed; no template has to be configured.
#[derive(Debug, Args)]
pub struct CheckdigitCommand {
    /// String to compute the check symbol for.
    input: String,
}

#[derive(Debug, Serialize)]
struct CheckdigitView {
    input: String,
    checkdigit: char,
    identifier: String,
}

impl CheckdigitCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let alphabet = ctx.resolve_alphabet()?;
        let checkdigit = alphabet.checkdigit(&self.input).map_err(CliError::from)?;

        let view = CheckdigitView {
            identifier: format!("{}{}", self.input, checkdigit),
            input: self.input,
            checkdigit,
        };

        match ctx.format {
            OutputFormat::Json => print_single(&view),
            OutputFormat::Table => println!("{}", view.checkdigit),
        }

        Ok(())
    }
}
