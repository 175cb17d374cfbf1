//! Generation directives appended to every vendored schema file

use crate::defaults::{EQUALITY_OPTION, EXTENSION_IMPORT, GO_PACKAGE_PREFIX};
use crate::path::FileRef;

/// The fixed three-line directive block.
///
/// Only the Go package prefix varies; the package directive joins it with the
/// folder of each vendored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directives {
    package_prefix: String,
}

impl Directives {
    pub fn new(package_prefix: impl Into<String>) -> Self {
        Self {
            package_prefix: package_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn package_prefix(&self) -> &str {
        &self.package_prefix
    }

    /// Go package that files in `file`'s folder are generated into.
    ///
    /// A top-level file gets the bare prefix, with no trailing slash.
    pub fn package_for(&self, file: &FileRef) -> String {
        match file.folder() {
            "" => self.package_prefix.clone(),
            folder => format!("{}/{}", self.package_prefix, folder),
        }
    }

    /// The directive lines for `file`, in append order, without newlines.
    pub fn lines_for(&self, file: &FileRef) -> [String; 3] {
        [
            format!("option go_package = \"{}\";", self.package_for(file)),
            format!("import \"{}\";", EXTENSION_IMPORT),
            format!("option {};", EQUALITY_OPTION),
        ]
    }
}

impl Default for Directives {
    fn default() -> Self {
        Self::new(GO_PACKAGE_PREFIX)
    }
}
