//! # Run Configuration
//!
//! A [`VendorConfig`] is built once by the CLI and passed by reference into
//! the pipeline. The resolver and materializer never read the environment;
//! the only lookup is the default destination, computed once here.

use std::path::PathBuf;

use crate::defaults::{default_dest_root_from_env, GO_PACKAGE_PREFIX, MODULE_PATH};
use crate::directives::Directives;
use crate::error::{Error, Result};
use crate::path::SourceTree;

/// Whether filesystem steps are performed or only described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Print the steps that would run; touch nothing.
    #[default]
    Preview,
    /// Perform the steps.
    Execute,
}

impl Mode {
    pub fn from_execute_flag(execute: bool) -> Self {
        if execute {
            Mode::Execute
        } else {
            Mode::Preview
        }
    }
}

/// Everything a vendoring run needs to know.
#[derive(Debug, Clone)]
pub struct VendorConfig {
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    pub mode: Mode,
    pub directives: Directives,
}

impl VendorConfig {
    /// Build a configuration from possibly-missing inputs.
    ///
    /// `source_root` is required. A missing `dest_root` is computed from the
    /// module path, `GOPATH` and the home directory. The module path decides
    /// only where files land; `go_package_prefix` feeds the package directive.
    pub fn new(
        source_root: Option<PathBuf>,
        dest_root: Option<PathBuf>,
        module_path: Option<String>,
        go_package_prefix: Option<String>,
        mode: Mode,
    ) -> Result<Self> {
        let source_root = source_root.ok_or_else(|| {
            Error::config(
                "the source root of the schema repository is not set",
                "pass --source-root or set ENVOYPATH to the repository's root folder",
            )
        })?;

        let dest_root = dest_root.unwrap_or_else(|| {
            default_dest_root_from_env(module_path.as_deref().unwrap_or(MODULE_PATH))
        });
        let directives =
            Directives::new(go_package_prefix.unwrap_or_else(|| GO_PACKAGE_PREFIX.to_string()));

        Ok(Self {
            source_root,
            dest_root,
            mode,
            directives,
        })
    }

    pub fn source_tree(&self) -> SourceTree {
        SourceTree::new(&self.source_root)
    }

    /// Check that the source root is usable before any traversal starts.
    pub fn validate(&self) -> Result<()> {
        if !self.source_root.is_dir() {
            return Err(Error::config(
                format!(
                    "source root '{}' is not a directory",
                    self.source_root.display()
                ),
                "point ENVOYPATH at the repository's root folder",
            ));
        }
        Ok(())
    }
}
