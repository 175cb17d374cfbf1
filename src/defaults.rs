//! Default values for schema-vendor configuration.
//!
//! This module provides the fixed layout constants and the computed default
//! destination root, so the CLI and the library agree on them.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Subdirectory of the source root that holds the schema files.
pub const SCHEMA_SUBDIR: &str = "api";

/// Module path the vendored schema files are laid out under. Only used to
/// compute the default destination root.
pub const MODULE_PATH: &str = "github.com/solo-io/gloo/projects/gloo/api/external";

/// Go import path prefix that generated code for vendored files lands in.
pub const GO_PACKAGE_PREFIX: &str = "github.com/solo-io/gloo/projects/gloo/pkg/api/external";

/// Auxiliary extension schema imported by every vendored file.
pub const EXTENSION_IMPORT: &str = "gogoproto/gogo.proto";

/// Option enabling equality generation for every message.
pub const EQUALITY_OPTION: &str = "(gogoproto.equal_all) = true";

/// Returns the default destination root: `<workspace>/src/<module_path>`.
///
/// The workspace is the first entry of `gopath` when it is set and non-empty,
/// otherwise `<home>/go`. Falls back to a relative `go` directory when
/// neither is available.
pub fn default_dest_root(module_path: &str, gopath: Option<&OsStr>, home: Option<&Path>) -> PathBuf {
    let workspace = gopath
        .and_then(|value| std::env::split_paths(value).find(|p| !p.as_os_str().is_empty()))
        .or_else(|| home.map(|h| h.join("go")))
        .unwrap_or_else(|| PathBuf::from("go"));

    workspace.join("src").join(module_path)
}

/// [`default_dest_root`] using `GOPATH` and the user's home directory.
pub fn default_dest_root_from_env(module_path: &str) -> PathBuf {
    let gopath = std::env::var_os("GOPATH");
    let home = dirs::home_dir();
    default_dest_root(module_path, gopath.as_deref(), home.as_deref())
}
