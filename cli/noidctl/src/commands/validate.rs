//! Validate command.

use anyhow::Result;
use clap::Args;
use noid_core::Template;
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::print_output;

use super::CommandContext;

/// Validate command - check identifiers against the template.
///
/// Exits non-zero if any identifier is invalid.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Identifiers to check.
    #[arg(required = true)]
    identifiers: Vec<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct ValidationRow {
    #[tabled(rename = "Identifier")]
    identifier: String,
    #[tabled(rename = "Valid")]
    valid: bool,
    #[tabled(rename = "Reason")]
    reason: String,
}

impl ValidateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let template = ctx.require_template()?;
        let rows = validation_rows(&template, &self.identifiers);
        print_output(&rows, ctx.format);

        let invalid = rows.iter().filter(|row| !row.valid).count();
        if invalid > 0 {
            return Err(CliError::InvalidIdentifiers {
                invalid,
                total: rows.len(),
            }
            .into());
        }

        Ok(())
    }
}

fn validation_rows(template: &Template, identifiers: &[String]) -> Vec<ValidationRow> {
    identifiers
        .iter()
        .map(|identifier| match template.check(identifier) {
            Ok(()) => ValidationRow {
                identifier: identifier.clone(),
                valid: true,
                reason: "-".to_string(),
            },
            Err(e) => {
                tracing::debug!(%identifier, error = %e, "identifier rejected");
                ValidationRow {
                    identifier: identifier.clone(),
                    valid: false,
                    reason: e.to_string(),
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_validation_rows() {
        let template = Template::parse("bc.sdk").unwrap();
        let rows = validation_rows(&template, &strings(&["bc03", "bc04", "xy03"]));
        assert!(rows[0].valid);
        assert_eq!(rows[0].reason, "-");
        assert!(!rows[1].valid);
        assert!(rows[1].reason.contains("check symbol mismatch"));
        assert!(!rows[2].valid);
        assert!(rows[2].reason.contains("prefix"));
    }

    #[test]
    fn test_run_fails_on_invalid() {
        let ctx = super::super::test_context(Some("bc.sdk"));
        let cmd = ValidateCommand {
            identifiers: strings(&["bc03", "bc3"]),
        };
        let err = cmd.run(ctx).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InvalidIdentifiers {
                invalid: 1,
                total: 2
            })
        ));
    }

    #[test]
    fn test_run_succeeds_when_all_valid() {
        let ctx = super::super::test_context(Some("bc.sdk"));
        let cmd = ValidateCommand {
            identifiers: strings(&["bc03"]),
        };
        assert!(cmd.run(ctx).is_ok());
    }
}
