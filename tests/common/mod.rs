//! Shared test utilities for CLI end-to-end tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_schema("a/r.proto", "message R {}\n");
//! fixture.command().arg("a/r.proto").assert().success();
//! ```

use std::path::{Path, PathBuf};

use assert_fs::prelude::*;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::schemas;
    pub use super::TestFixture;
}

/// Schema snippets for building import graphs.
#[allow(dead_code)]
pub mod schemas {
    /// The three directive lines appended for files under `pkg/`.
    pub const PKG_FOOTER: &str = "option go_package = \"example.com/ext/gen/pkg\";\n\
                                  import \"gogoproto/gogo.proto\";\n\
                                  option (gogoproto.equal_all) = true;\n";

    /// A schema file with a proto3 header and the given imports.
    pub fn importing(imports: &[&str]) -> String {
        let mut text = String::from("syntax = \"proto3\";\n\n");
        for import in imports {
            text.push_str(&format!("import \"{}\";\n", import));
        }
        text
    }
}

/// A temporary source tree (`envoy/api/...`) plus a destination directory.
#[allow(dead_code)]
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new fixture with an empty `envoy/api` directory.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("envoy/api")
            .create_dir_all()
            .expect("Failed to create source tree");
        Self { temp_dir }
    }

    /// Add a schema file under `envoy/api`.
    pub fn with_schema(self, file: &str, content: &str) -> Self {
        self.temp_dir
            .child("envoy/api")
            .child(file)
            .write_str(content)
            .expect("Failed to write schema file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn source_root(&self) -> PathBuf {
        self.temp_dir.path().join("envoy")
    }

    pub fn dest_root(&self) -> PathBuf {
        self.temp_dir.path().join("out")
    }

    /// Path of a vendored file under the destination root.
    pub fn vendored(&self, file: &str) -> PathBuf {
        self.dest_root().join(file)
    }

    /// Command with source root, destination root, module path and package
    /// prefix configured through the environment, in preview mode.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("schema-vendor");
        cmd.current_dir(self.path())
            .env("ENVOYPATH", self.source_root())
            .env("SCHEMA_VENDOR_DEST", self.dest_root())
            .env("SCHEMA_VENDOR_MODULE_PATH", "example.com/ext")
            .env("SCHEMA_VENDOR_GO_PACKAGE_PREFIX", "example.com/ext/gen")
            .env("NO_COLOR", "1")
            .env_remove("COPY")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Like [`TestFixture::command`] but in execute mode.
    pub fn execute_command(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.env("COPY", "1");
        cmd
    }

    /// True if nothing exists under the destination root.
    pub fn dest_untouched(&self) -> bool {
        !self.dest_root().exists()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
