//! Error handling and display for the CLI.

use colored::Colorize;
use noid_core::TemplateError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("No template given. Pass --template, set NOID_TEMPLATE, or run `noid --template <T> config set`.")]
    NoTemplate,

    #[error("{0}")]
    Template(#[from] TemplateError),

    #[error("{invalid} of {total} identifiers are invalid")]
    InvalidIdentifiers { invalid: usize, total: usize },
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        if let Some(hint) = hint(cli_err) {
            eprintln!("\n{}", hint.yellow());
        }
    }
}

fn hint(err: &CliError) -> Option<&'static str> {
    match err {
        CliError::Template(TemplateError::CapacityExceeded { .. }) => Some(
            "Hint: Use a 'z' generator (e.g. prefix.zeek) for an identifier space that never runs out.",
        ),
        CliError::Template(TemplateError::InvalidTemplate { .. }) => {
            Some("Hint: Templates look like <prefix>.<r|s|z><e|d...>[k], e.g. bc.sdk.")
        }
        CliError::Template(TemplateError::InvalidCharacter { .. }) => Some(
            "Hint: With a check symbol, the prefix may only use characters from the alphabet.",
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_hint() {
        let err = CliError::Template(TemplateError::CapacityExceeded {
            value: 100,
            capacity: 100,
        });
        assert!(hint(&err).unwrap().contains("'z' generator"));
        assert!(hint(&CliError::NoTemplate).is_none());
    }

    #[test]
    fn test_template_error_message_passes_through() {
        let err = CliError::from(TemplateError::CapacityExceeded {
            value: 100,
            capacity: 100,
        });
        assert_eq!(
            err.to_string(),
            "sequence value 100 exceeds template capacity 100"
        );
    }
}
