//! Path resolution for schema file references
//!
//! A [`FileRef`] names a schema file relative to the schema subdirectory of
//! the source tree (for example `envoy/config/route/v3/route.proto`). The
//! [`SourceTree`] maps those references onto disk.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::defaults::SCHEMA_SUBDIR;

/// Relative path identifying a schema file within the source tree.
///
/// Identity is the normalized path string, so `./a/b.proto`, `a//b.proto`
/// and `a\b.proto` are all the same reference. Ordering is lexicographic on
/// that string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FileRef(String);

impl FileRef {
    /// Create a normalized reference.
    ///
    /// Backslashes become `/`, empty and `.` segments are dropped. `..`
    /// segments are kept as written.
    pub fn new(raw: &str) -> Self {
        let unified = raw.trim().replace('\\', "/");
        let normalized = unified
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect::<Vec<_>>()
            .join("/");
        FileRef(normalized)
    }

    /// The normalized reference string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `..` segments climb above the directory the reference is
    /// relative to. `a/../b.proto` stays inside; `../b.proto` does not.
    pub fn escapes_root(&self) -> bool {
        let mut depth = 0usize;
        for segment in self.0.split('/') {
            if segment == ".." {
                match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return true,
                }
            } else {
                depth += 1;
            }
        }
        false
    }

    /// Containing folder of the reference, `""` for a top-level file.
    pub fn folder(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileRef {
    fn from(raw: &str) -> Self {
        FileRef::new(raw)
    }
}

/// A [`FileRef`] resolved to an absolute on-disk location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRef {
    pub file: FileRef,
    pub path: PathBuf,
    pub exists: bool,
}

/// The schema subtree of a foreign source repository.
#[derive(Debug, Clone)]
pub struct SourceTree {
    schema_root: PathBuf,
}

impl SourceTree {
    /// Create a source tree rooted at `source_root/api`.
    pub fn new<P: AsRef<Path>>(source_root: P) -> Self {
        Self {
            schema_root: source_root.as_ref().join(SCHEMA_SUBDIR),
        }
    }

    /// Directory that [`FileRef`]s are relative to
    pub fn schema_root(&self) -> &Path {
        &self.schema_root
    }

    /// On-disk location of `file`, whether or not it exists.
    pub fn locate(&self, file: &FileRef) -> PathBuf {
        self.schema_root.join(file.as_str())
    }

    /// Resolve `file` and check that it exists as a regular file.
    pub fn resolve(&self, file: &FileRef) -> ResolvedRef {
        let path = self.locate(file);
        let exists = path.is_file();
        ResolvedRef {
            file: file.clone(),
            path,
            exists,
        }
    }
}
