//! noidctl (noid) - mint and validate opaque identifiers from the shell.
//!
//! The CLI never stores a counter: every sequence value is passed in
//! explicitly by the caller.

use anyhow::Result;
use clap::Parser;

mod commands;
mod config;
mod error;
mod logging;
mod output;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose());

    if let Err(e) = cli.run() {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
