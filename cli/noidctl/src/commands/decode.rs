//! Decode command (identifier back to sequence value).

use anyhow::Result;
use clap::Args;
use noid_core::Template;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{print_output, OutputFormat};

use super::CommandContext;

/// Decode command - recover the sequence value of each identifier.
#[derive(Debug, Args)]
pub struct DecodeCommand {
    /// Identifiers to decode.
    #[arg(required = true)]
    identifiers: Vec<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct DecodeRow {
    #[tabled(rename = "Identifier")]
    identifier: String,
    #[tabled(rename = "Sequence")]
    sequence: u64,
}

impl DecodeCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let template = ctx.require_template()?;
        let rows = decode_rows(&template, &self.identifiers)?;

        match ctx.format {
            OutputFormat::Json => print_output(&rows, ctx.format),
            OutputFormat::Table => {
                for row in &rows {
                    println!("{}", row.sequence);
                }
            }
        }

        Ok(())
    }
}

fn decode_rows(template: &Template, identifiers: &[String]) -> Result<Vec<DecodeRow>> {
    identifiers
        .iter()
        .map(|identifier| {
            let sequence = template
                .decode(identifier)
                .map_err(|e| anyhow::anyhow!("Cannot decode '{}': {}", identifier, e))?;
            Ok(DecodeRow {
                identifier: identifier.clone(),
                sequence,
            })
        })
        .collect()
}
