//! Mint command.

use anyhow::Result;
use clap::Args;
use noid_core::Template;
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{print_output, OutputFormat};

use super::CommandContext;

/// Mint command - turn sequence values into identifiers.
///
/// The caller owns the counter; pass the values to mint explicitly.
#[derive(Debug, Args)]
pub struct MintCommand {
    /// Sequence values to mint.
    #[arg(conflicts_with_all = ["start", "count"])]
    values: Vec<u64>,

    /// First sequence value of a contiguous range.
    #[arg(long, requires = "count")]
    start: Option<u64>,

    /// Number of identifiers to mint from --start (default 0).
    #[arg(long)]
    count: Option<u64>,
}

#[derive(Debug, Serialize, Tabled)]
struct MintRow {
    #[tabled(rename = "Sequence")]
    sequence: u64,
    #[tabled(rename = "Identifier")]
    identifier: String,
}

impl MintCommand {
    /// Sequence values in minting order. Ranges are produced lazily.
    fn sequence_values(&self) -> Result<Box<dyn Iterator<Item = u64> + '_>> {
        if let Some(count) = self.count {
            let start = self.start.unwrap_or(0);
            let end = start.checked_add(count).ok_or_else(|| {
                anyhow::anyhow!("Range --start {} --count {} overflows u64", start, count)
            })?;
            return Ok(Box::new(start..end));
        }

        if self.values.is_empty() {
            return Err(anyhow::anyhow!(
                "No sequence values given. Pass values or --start/--count."
            ));
        }

        Ok(Box::new(self.values.iter().copied()))
    }

    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let template = ctx.require_template()?;
        let rows = mint_rows(&template, self.sequence_values()?)?;

        match ctx.format {
            OutputFormat::Json => print_output(&rows, ctx.format),
            OutputFormat::Table => {
                // one identifier per line so the output can be piped
                for row in &rows {
                    println!("{}", row.identifier);
                }
            }
        }

        Ok(())
    }
}

/// Mints each value in order, stopping at the first failure.
fn mint_rows(
    template: &Template,
    values: impl IntoIterator<Item = u64>,
) -> Result<Vec<MintRow>, CliError> {
    values
        .into_iter()
        .map(|sequence| {
            let identifier = template.mint(sequence)?;
            Ok(MintRow {
                sequence,
                identifier,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use noid_core::TemplateError;

    fn command(values: Vec<u64>, start: Option<u64>, count: Option<u64>) -> MintCommand {
        MintCommand {
            values,
            start,
            count,
        }
    }

    fn values(cmd: &MintCommand) -> Vec<u64> {
        cmd.sequence_values().unwrap().collect()
    }

    #[test]
    fn test_explicit_values() {
        let cmd = command(vec![3, 1], None, None);
        assert_eq!(values(&cmd), vec![3, 1]);
    }

    #[test]
    fn test_range_values() {
        let cmd = command(vec![], Some(98), Some(3));
        assert_eq!(values(&cmd), vec![98, 99, 100]);

        let cmd = command(vec![], None, Some(2));
        assert_eq!(values(&cmd), vec![0, 1]);
    }

    #[test]
    fn test_no_values() {
        assert!(command(vec![], None, None).sequence_values().is_err());
        assert!(command(vec![], Some(u64::MAX), Some(2))
            .sequence_values()
            .is_err());
    }

    #[test]
    fn test_mint_rows() {
        let template = Template::parse("bc.sdd").unwrap();
        let rows = mint_rows(&template, [0, 23, 99]).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["bc00", "bc23", "bc99"]);
    }

    #[test]
    fn test_mint_rows_capacity_exceeded() {
        let template = Template::parse("bc.sdd").unwrap();
        let err = mint_rows(&template, [99, 100]).unwrap_err();
        assert!(matches!(
            err,
            CliError::Template(TemplateError::CapacityExceeded { value: 100, .. })
        ));
    }

    #[test]
    fn test_huge_count_stops_at_capacity() {
        let template = Template::parse("bc.sdd").unwrap();
        let cmd = command(vec![], None, Some(u64::MAX));
        let err = mint_rows(&template, cmd.sequence_values().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Template(TemplateError::CapacityExceeded {
                value: 100,
                capacity: 100
            })
        ));
    }

    #[test]
    fn test_run_huge_count_fails_cleanly() {
        let ctx = super::super::test_context(Some("bc.sdd"));
        let cmd = command(vec![], Some(50), Some(3_000_000_000));
        let err = cmd.run(ctx).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::Template(TemplateError::CapacityExceeded { value: 100, .. }))
        ));
    }

    #[test]
    fn test_run_with_context() {
        let ctx = super::super::test_context(Some("bc.zdk"));
        let cmd = command(vec![0, 10, 1_000], None, None);
        assert!(cmd.run(ctx).is_ok());
    }
}
