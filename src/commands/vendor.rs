//! Vendor command implementation
//!
//! Resolves the import closure of the root schema file and vendors it:
//! 1. Build the run configuration from flags and environment
//! 2. Resolve the closure (or just list it with `--list`)
//! 3. Preview or execute the materialization steps
//! 4. Report the outcome

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::builder::FalseyValueParser;
use clap::{Args, ValueEnum};

use schema_vendor::config::{Mode, VendorConfig};
use schema_vendor::error::Error;
use schema_vendor::output::{self, OutputConfig};
use schema_vendor::path::FileRef;
use schema_vendor::pipeline;

/// Output format for `--list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Text,
    Json,
}

/// Arguments for the vendor command
#[derive(Args, Debug)]
pub struct VendorArgs {
    /// Root schema file, relative to the source tree's api/ directory
    #[arg(value_name = "ROOT")]
    pub root: String,

    /// Root folder of the schema repository
    #[arg(long, value_name = "PATH", env = "ENVOYPATH")]
    pub source_root: Option<PathBuf>,

    /// Destination root (defaults to $GOPATH/src/<module path>)
    #[arg(long, value_name = "PATH", env = "SCHEMA_VENDOR_DEST")]
    pub dest_root: Option<PathBuf>,

    /// Module path the schemas are vendored under (sets the default destination)
    #[arg(long, value_name = "PATH", env = "SCHEMA_VENDOR_MODULE_PATH")]
    pub module_path: Option<String>,

    /// Import path prefix written into each file's go_package option
    #[arg(long, value_name = "PATH", env = "SCHEMA_VENDOR_GO_PACKAGE_PREFIX")]
    pub go_package_prefix: Option<String>,

    /// Perform the copy instead of printing the commands
    #[arg(long, env = "COPY", value_parser = FalseyValueParser::new())]
    pub execute: bool,

    /// Only list the resolved closure
    #[arg(long)]
    pub list: bool,

    /// Format for --list
    #[arg(long, value_enum, default_value = "text")]
    pub format: ListFormat,
}

/// Execute the vendor command
pub fn execute(args: VendorArgs, out: &OutputConfig) -> Result<()> {
    let root = FileRef::new(&args.root);
    if root.as_str().is_empty() {
        anyhow::bail!("The root schema file must not be empty");
    }

    let config = VendorConfig::new(
        args.source_root,
        args.dest_root,
        args.module_path,
        args.go_package_prefix,
        Mode::from_execute_flag(args.execute),
    )?;

    if args.list {
        let closure = pipeline::resolve(&config, &root)?;
        match args.format {
            ListFormat::Text => print!("{}", output::render_closure(out, &closure)),
            ListFormat::Json => {
                let json = serde_json::to_string_pretty(&closure).map_err(|e| {
                    Error::Serialization {
                        message: e.to_string(),
                    }
                })?;
                println!("{}", json);
            }
        }
        return Ok(());
    }

    if config.mode == Mode::Preview {
        println!("Run these commands:");
    }

    let outcome = pipeline::execute(&config, &root, io::stdout().lock())?;
    let report = &outcome.report;

    if config.mode == Mode::Execute {
        print!("{}", output::render_summary(out, report, &config.dest_root));
    }

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} files failed to vendor",
            report.failures.len(),
            outcome.closure.len()
        );
    }

    Ok(())
}
