//! # Output Formatting
//!
//! Human-facing text for the CLI: colour/emoji selection and rendering of
//! closure listings and run summaries.
//!
//! Colour follows the usual conventions: `--color=always|never|auto`, then in
//! auto mode `NO_COLOR`, `CLICOLOR=0`, `CLICOLOR_FORCE`, `TERM=dumb` and
//! finally terminal detection through `console`.

use std::env;
use std::fmt::Write as _;
use std::path::Path;

use console::style;

use crate::materializer::VendorReport;
use crate::resolver::Closure;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from the `--color` flag value.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };
        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    pub fn plain() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns `emoji_str` when colour is enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// One reference per line, unresolved ones marked.
pub fn render_closure(config: &OutputConfig, closure: &Closure) -> String {
    let mut out = String::new();
    for file in closure.files() {
        if closure.is_unresolved(file) {
            let marker = emoji(config, "❓", "(missing)");
            let name = if config.use_color {
                style(file.as_str()).yellow().to_string()
            } else {
                file.to_string()
            };
            let _ = writeln!(out, "{} {}", name, marker);
        } else {
            let _ = writeln!(out, "{}", file);
        }
    }
    out
}

/// Summary printed after an execute run.
pub fn render_summary(config: &OutputConfig, report: &VendorReport, dest_root: &Path) -> String {
    let mut out = String::new();
    let ok = emoji(config, "✅", "[OK]");
    let _ = writeln!(
        out,
        "{} {} files vendored to {}",
        ok,
        report.applied.len(),
        dest_root.display()
    );
    if !report.skipped.is_empty() {
        let _ = writeln!(
            out,
            "   {} missing from the source tree and skipped",
            report.skipped.len()
        );
    }
    for failure in &report.failures {
        let mark = emoji(config, "❌", "[FAILED]");
        let _ = writeln!(out, "{} {}", mark, failure.error);
    }
    out
}
