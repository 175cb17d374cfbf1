//! Orchestrator for a complete vendoring run
//!
//! This module coordinates the two stages behind a single call:
//! 1. Resolve the import closure of the root file
//! 2. Materialize the closure with the executor selected by the run mode

use std::io::Write;

use log::info;

use crate::config::{Mode, VendorConfig};
use crate::error::Result;
use crate::executor::{FsExecutor, RecordingExecutor};
use crate::materializer::{self, VendorReport};
use crate::path::FileRef;
use crate::resolver::{self, Closure};

/// Result of [`execute`]: the resolved closure and what was done with it.
#[derive(Debug)]
pub struct RunOutcome {
    pub closure: Closure,
    pub report: VendorReport,
}

/// Resolve the closure of `root` without materializing anything.
pub fn resolve(config: &VendorConfig, root: &FileRef) -> Result<Closure> {
    config.validate()?;
    let closure = resolver::resolve_closure(root, &config.source_tree())?;
    info!(
        "Resolved {} files from {} ({} unresolved)",
        closure.len(),
        root,
        closure.unresolved().count()
    );
    Ok(closure)
}

/// Resolve and vendor the closure of `root`.
///
/// In preview mode every step is written to `preview_out`, one per line, and
/// nothing on disk changes.
pub fn execute<W: Write>(
    config: &VendorConfig,
    root: &FileRef,
    preview_out: W,
) -> Result<RunOutcome> {
    let closure = resolve(config, root)?;
    let tree = config.source_tree();

    let report = match config.mode {
        Mode::Preview => {
            let mut recorder = RecordingExecutor::new(preview_out);
            materializer::vendor(
                &closure,
                &tree,
                &config.dest_root,
                &config.directives,
                &mut recorder,
            )
        }
        Mode::Execute => materializer::vendor(
            &closure,
            &tree,
            &config.dest_root,
            &config.directives,
            &mut FsExecutor::new(),
        ),
    };

    Ok(RunOutcome { closure, report })
}
