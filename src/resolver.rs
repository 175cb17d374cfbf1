//! Import closure resolution
//!
//! Starting from a root schema file, the resolver reads each file once,
//! extracts its `import "...";` declarations and follows them until no new
//! references turn up. The result is a [`Closure`]: every reachable
//! reference, including ones that could not be read.
//!
//! ## Process
//!
//! 1.  **Worklist**: The root is seeded into an explicit stack together with a
//!     visited set. There is no call recursion, so deep import chains cannot
//!     exhaust the stack.
//!
//! 2.  **Cycle Safety**: A reference enters the visited set when it is first
//!     discovered, before it is expanded. Self-imports and mutual imports are
//!     therefore never expanded twice and traversal always terminates.
//!
//! 3.  **Dangling References**: A reference that cannot be read is logged once
//!     and kept in the closure with no outgoing edges. Pruning happens later,
//!     in the materializer.
//!
//! Each reachable file is read at most once, so the cost is O(V + E) reads and
//! scans regardless of how many files import the same dependency.

use std::collections::BTreeSet;

use log::{debug, warn};
use regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::filesystem::SchemaSource;
use crate::path::FileRef;

/// Matches `import "x";`, `import public "x";` and `import weak "x";`.
const IMPORT_PATTERN: &str = r#"import\s+(?:(?:public|weak)\s+)?"([^"]+)"\s*;"#;

/// Directed import relation: `from` declares an import of `to`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ImportEdge {
    pub from: FileRef,
    pub to: FileRef,
}

/// The transitive import closure of a root schema file.
///
/// Enumeration is always sorted by reference string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Closure {
    root: Option<FileRef>,
    files: BTreeSet<FileRef>,
    unresolved: BTreeSet<FileRef>,
    edges: BTreeSet<ImportEdge>,
}

impl Closure {
    /// The root reference this closure was resolved from
    pub fn root(&self) -> Option<&FileRef> {
        self.root.as_ref()
    }

    /// Every reference in the closure, sorted
    pub fn files(&self) -> impl Iterator<Item = &FileRef> {
        self.files.iter()
    }

    /// References that could not be read during traversal, sorted
    pub fn unresolved(&self) -> impl Iterator<Item = &FileRef> {
        self.unresolved.iter()
    }

    /// Import edges observed in readable files, sorted by source then target
    pub fn edges(&self) -> impl Iterator<Item = &ImportEdge> {
        self.edges.iter()
    }

    pub fn contains(&self, file: &FileRef) -> bool {
        self.files.contains(file)
    }

    pub fn is_unresolved(&self, file: &FileRef) -> bool {
        self.unresolved.contains(file)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Extracts import declarations from schema text.
#[derive(Debug, Clone)]
pub struct ImportScanner {
    pattern: Regex,
}

impl ImportScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(IMPORT_PATTERN)?,
        })
    }

    /// Imported references in file order, without duplicates.
    pub fn extract(&self, text: &str) -> Vec<FileRef> {
        let mut seen = BTreeSet::new();
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| FileRef::new(m.as_str()))
            .filter(|file| seen.insert(file.clone()))
            .collect()
    }
}

/// Extract the import references declared in `text`.
pub fn extract_imports(text: &str) -> Result<Vec<FileRef>> {
    Ok(ImportScanner::new()?.extract(text))
}

/// Resolve the transitive import closure of `root` within `source`.
///
/// Unreadable references are logged as `did not find path <ref>` the moment
/// they are expanded, and recorded in [`Closure::unresolved`].
pub fn resolve_closure<S: SchemaSource + ?Sized>(root: &FileRef, source: &S) -> Result<Closure> {
    let scanner = ImportScanner::new()?;

    let mut closure = Closure {
        root: Some(root.clone()),
        ..Closure::default()
    };
    let mut visited: BTreeSet<FileRef> = BTreeSet::new();
    let mut worklist: Vec<FileRef> = Vec::new();

    visited.insert(root.clone());
    worklist.push(root.clone());

    while let Some(file) = worklist.pop() {
        debug!("Resolving imports of {}", file);

        match source.read_schema(&file) {
            Ok(text) => {
                for child in scanner.extract(&text) {
                    closure.edges.insert(ImportEdge {
                        from: file.clone(),
                        to: child.clone(),
                    });
                    if visited.insert(child.clone()) {
                        worklist.push(child);
                    }
                }
            }
            Err(e) => {
                warn!("did not find path {}", file);
                debug!("Reading {} failed: {}", file, e);
                closure.unresolved.insert(file.clone());
            }
        }
    }

    closure.files = visited;
    Ok(closure)
}
