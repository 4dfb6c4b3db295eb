//! Inspect command (show how a template is parsed).

use anyhow::Result;
use clap::Args;
use noid_core::Template;
use serde::Serialize;

use crate::output::{print_single, OutputFormat};

use super::CommandContext;

/// Inspect command - print the parsed template and its capacity.
#[derive(Debug, Args)]
pub struct InspectCommand {}

#[derive(Debug, Serialize)]
struct TemplateView {
    template: String,
    prefix: String,
    generator: String,
    classes: String,
    checkdigit: bool,
    radix_sizes: Vec<usize>,
    capacity: String,
    min: u64,
    first: Option<String>,
    alphabet: String,
}

impl TemplateView {
    fn new(template: &Template) -> Self {
        Self {
            template: template.to_string(),
            prefix: template.prefix().to_string(),
            generator: template.generator().to_string(),
            classes: template
                .character_classes()
                .iter()
                .map(|c| c.as_char())
                .collect(),
            checkdigit: template.has_checkdigit(),
            radix_sizes: template.radix_sizes().to_vec(),
            capacity: template.capacity().to_string(),
            min: template.min(),
            // a check symbol over a prefix outside the alphabet cannot be minted
            first: template.first().ok(),
            alphabet: template.alphabet().to_string(),
        }
    }
}

impl InspectCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let template = ctx.require_template()?;
        let view = TemplateView::new(&template);

        match ctx.format {
            OutputFormat::Json => print_single(&view),
            OutputFormat::Table => {
                println!("template:    {}", view.template);
                println!("prefix:      {}", display_or_dash(&view.prefix));
                println!("generator:   {}", view.generator);
                println!("classes:     {}", view.classes);
                println!("checkdigit:  {}", view.checkdigit);
                println!(
                    "radix sizes: {}",
                    view.radix_sizes
                        .iter()
                        .map(|r| r.to_string())
                        .collect::<Vec<_>>()
                        .join(" x ")
                );
                println!("capacity:    {}", view.capacity);
                println!("min:         {}", view.min);
                println!(
                    "first:       {}",
                    view.first.as_deref().unwrap_or("-")
                );
                println!("alphabet:    {}", view.alphabet);
            }
        }

        Ok(())
    }
}

fn display_or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}
