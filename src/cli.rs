//! CLI argument parsing and logging setup

use std::io::Write;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;

use crate::commands;
use schema_vendor::output::OutputConfig;

const EXAMPLE: &str = "\
Example: copy route_components.proto and its dependencies from ~/sources/envoy/api
into ~/go/src/github.com/solo-io/gloo/projects/gloo/api/external:

    COPY=1 GOPATH=~/go ENVOYPATH=~/sources/envoy schema-vendor envoy/config/route/v3/route_components.proto";

/// Vendor a schema file and everything it imports from a foreign source tree
#[derive(Parser, Debug)]
#[command(name = "schema-vendor")]
#[command(version, about, long_about = None, after_help = EXAMPLE)]
pub struct Cli {
    #[command(flatten)]
    vendor: commands::vendor::VendorArgs,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Parse `std::env::args`, exiting with usage and an example on error.
    pub fn parse_or_exit() -> Self {
        match Cli::try_parse() {
            Ok(cli) => cli,
            Err(e) => {
                let is_usage = matches!(
                    e.kind(),
                    ErrorKind::MissingRequiredArgument
                        | ErrorKind::UnknownArgument
                        | ErrorKind::TooManyValues
                );
                if is_usage {
                    let _ = e.print();
                    eprintln!();
                    eprintln!("{}", EXAMPLE);
                    std::process::exit(e.exit_code());
                }
                e.exit()
            }
        }
    }

    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);
        commands::vendor::execute(self.vendor, &output)
    }
}

/// Log records go to stderr as `<level>: <message>`.
fn init_logging(level: &str) {
    let _ = env_logger::Builder::new()
        .parse_filters(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{}: {}",
                record.level().as_str().to_lowercase(),
                record.args()
            )
        })
        .try_init();
}
