//! Materializing a resolved closure into the vendor directory
//!
//! For every reference in a [`Closure`], in sorted order, the materializer
//! plans and runs three kinds of step through a [`CommandExecutor`]:
//!
//! 1.  **Create Directories**: `mkdir -p <dest_root>/<folder>`.
//!
//! 2.  **Copy**: the source file is copied byte-for-byte over any existing
//!     destination file.
//!
//! 3.  **Annotate**: the three generation directives from [`Directives`] are
//!     appended, one line each.
//!
//! References missing from the source tree are skipped without a step. A
//! failing step abandons the rest of that entry only; every other entry is
//! still attempted.
//!
//! Two entries are refused before any step runs: a reference whose `..`
//! segments climb out of the destination root, and one whose destination is
//! the source file itself (copying would truncate it).
//!
//! Because the copy replaces the destination before the appends run, vendoring
//! the same tree twice produces the same bytes both times.

use std::fmt;
use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::directives::Directives;
use crate::error::Error;
use crate::executor::{Command, CommandExecutor};
use crate::path::{FileRef, SourceTree};
use crate::resolver::Closure;

/// One vendored file and the exact steps that produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorEntry {
    pub file: FileRef,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub commands: Vec<Command>,
}

impl VendorEntry {
    /// Plan the steps for `file`.
    ///
    /// `source_ends_with_newline` decides whether the first directive needs a
    /// line break in front of it.
    pub fn plan(
        file: &FileRef,
        source: &Path,
        dest_root: &Path,
        directives: &Directives,
        source_ends_with_newline: bool,
    ) -> Self {
        let destination = dest_root.join(file.as_str());
        let dest_dir = destination
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dest_root.to_path_buf());

        let mut commands = vec![
            Command::MakeDirectory { path: dest_dir },
            Command::CopyFile {
                from: source.to_path_buf(),
                to: destination.clone(),
            },
        ];
        for (idx, line) in directives.lines_for(file).into_iter().enumerate() {
            let text = if idx == 0 && !source_ends_with_newline {
                format!("\n{}", line)
            } else {
                line
            };
            commands.push(Command::AppendText {
                path: destination.clone(),
                text,
            });
        }

        Self {
            file: file.clone(),
            source: source.to_path_buf(),
            destination,
            commands,
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
}

/// An entry that could not be materialized.
#[derive(Debug)]
pub struct EntryFailure {
    pub file: FileRef,
    pub error: Error,
}

/// Outcome of a [`vendor`] run.
#[derive(Debug, Default)]
pub struct VendorReport {
    /// Entries whose every step succeeded, in processing order
    pub applied: Vec<VendorEntry>,
    /// References absent from the source tree
    pub skipped: Vec<FileRef>,
    pub failures: Vec<EntryFailure>,
}

impl VendorReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Every command that ran, across all applied entries, in order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.applied.iter().flat_map(|entry| entry.commands.iter())
    }

    fn fail(&mut self, file: &FileRef, step: &str, message: impl fmt::Display) {
        warn!("Failed to vendor {} ({}): {}", file, step, message);
        self.failures.push(EntryFailure {
            file: file.clone(),
            error: Error::Materialize {
                file: file.to_string(),
                step: step.to_string(),
                message: message.to_string(),
            },
        });
    }
}

/// Vendor every readable member of `closure` into `dest_root`.
pub fn vendor(
    closure: &Closure,
    source: &SourceTree,
    dest_root: &Path,
    directives: &Directives,
    executor: &mut dyn CommandExecutor,
) -> VendorReport {
    let mut report = VendorReport::default();

    'entries: for file in closure.files() {
        let resolved = source.resolve(file);
        if !resolved.exists {
            debug!("Skipping {}: not present in source tree", file);
            report.skipped.push(file.clone());
            continue;
        }

        if file.escapes_root() {
            report.fail(file, "path", "destination is outside the destination root");
            continue;
        }

        let entry = VendorEntry::plan(
            file,
            &resolved.path,
            dest_root,
            directives,
            ends_with_newline(&resolved.path),
        );

        if same_file(&entry.source, &entry.destination) {
            report.fail(file, "cp", "source and destination are the same file");
            continue;
        }

        for command in &entry.commands {
            if let Err(e) = command.apply(executor) {
                report.fail(file, command.step(), e);
                continue 'entries;
            }
        }

        report.applied.push(entry);
    }

    info!(
        "Vendored {} of {} files ({} missing, {} failed)",
        report.applied.len(),
        closure.len(),
        report.skipped.len(),
        report.failures.len()
    );
    report
}

/// Whether both paths name the same existing file, after resolving links.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Whether the file's last byte is a newline. Empty and unreadable files
/// count as terminated.
fn ends_with_newline(path: &Path) -> bool {
    let Ok(mut file) = File::open(path) else {
        return true;
    };
    if file.seek(SeekFrom::End(-1)).is_err() {
        return true;
    }
    let mut last = [0u8; 1];
    match file.read_exact(&mut last) {
        Ok(()) => last[0] == b'\n',
        Err(_) => true,
    }
}
