//! # Schema Vendor Library
//!
//! This library resolves the transitive import closure of a schema file inside
//! a large foreign source tree and copies that closure into a local vendor
//! directory, appending a fixed block of generation directives to every file.
//! It backs the `schema-vendor` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use schema_vendor::filesystem::MemoryFS;
//! use schema_vendor::path::FileRef;
//! use schema_vendor::resolver::resolve_closure;
//!
//! let mut fs = MemoryFS::new();
//! fs.add_file_string("route.proto", "import \"base.proto\";\nimport \"missing.proto\";");
//! fs.add_file_string("base.proto", "syntax = \"proto3\";");
//!
//! let closure = resolve_closure(&FileRef::new("route.proto"), &fs).unwrap();
//! let files: Vec<_> = closure.files().map(|f| f.as_str()).collect();
//! assert_eq!(files, vec!["base.proto", "missing.proto", "route.proto"]);
//! assert!(closure.is_unresolved(&FileRef::new("missing.proto")));
//! ```
//!
//! ## Core Concepts
//!
//! - **References (`path`)**: `FileRef` names a schema file relative to the
//!   `api/` directory of the source tree; `SourceTree` maps it onto disk.
//! - **Resolution (`resolver`)**: a worklist traversal over `import "...";`
//!   declarations producing a sorted `Closure`. Cycles are harmless and
//!   unreadable references stay in the closure.
//! - **Execution (`executor`)**: every filesystem step is a `Command` run by a
//!   `CommandExecutor`, either for real or recorded as a preview.
//! - **Materialization (`materializer`)**: copies each present closure member
//!   and appends the `directives` block, isolating failures per file.
//!
//! ## Execution Flow
//!
//! `pipeline::execute` validates the `config`, resolves the closure and then
//! vendors it with the executor matching the run mode.

pub mod config;
pub mod defaults;
pub mod directives;
pub mod error;
pub mod executor;
pub mod filesystem;
pub mod materializer;
pub mod output;
pub mod path;
pub mod pipeline;
pub mod resolver;

#[cfg(test)]
mod resolver_proptest;
