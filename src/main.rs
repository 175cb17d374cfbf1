//! # Schema Vendor CLI
//!
//! This is the binary entry point for the `schema-vendor` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Running the vendoring command with the parsed arguments.
//! - Translating top-level errors into a non-zero exit status.
//!
//! The core logic lives in the `schema_vendor` library crate; the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;

fn main() -> Result<()> {
    let cli = cli::Cli::parse_or_exit();
    cli.execute()
}
