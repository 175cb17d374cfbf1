//! Schema sources the import resolver can read from
//!
//! The resolver only needs to read a schema file by reference, so it depends
//! on the [`SchemaSource`] trait. [`SourceTree`] reads from disk; [`MemoryFS`]
//! keeps schema files in memory, which is what tests and benchmarks use to
//! build import graphs without touching the filesystem.

use std::collections::BTreeMap;
use std::fs;
use std::io;

use crate::path::{FileRef, SourceTree};

/// Read access to schema file contents by reference.
pub trait SchemaSource {
    /// Read the full text of `file`.
    ///
    /// A missing file is reported as `io::ErrorKind::NotFound`.
    fn read_schema(&self, file: &FileRef) -> io::Result<String>;
}

impl SchemaSource for SourceTree {
    fn read_schema(&self, file: &FileRef) -> io::Result<String> {
        fs::read_to_string(self.locate(file))
    }
}

/// A schema file held in memory
#[derive(Debug, Clone)]
pub struct File {
    /// File content as bytes
    pub content: Vec<u8>,
}

impl File {
    /// Create a new file with content
    pub fn new(content: Vec<u8>) -> Self {
        Self { content }
    }

    /// Create a new file from string content
    pub fn from_string(content: &str) -> Self {
        Self::new(content.as_bytes().to_vec())
    }
}

/// In-memory schema tree keyed by [`FileRef`]
#[derive(Debug, Clone, Default)]
pub struct MemoryFS {
    files: BTreeMap<FileRef, File>,
}

impl MemoryFS {
    /// Create a new empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file with raw content
    pub fn add_file_content(&mut self, path: &str, content: Vec<u8>) {
        self.files.insert(FileRef::new(path), File::new(content));
    }

    /// Add or replace a file with string content
    pub fn add_file_string(&mut self, path: &str, content: &str) {
        self.files.insert(FileRef::new(path), File::from_string(content));
    }

    /// Get a file by reference
    pub fn get_file(&self, file: &FileRef) -> Option<&File> {
        self.files.get(file)
    }

    /// Check if a file exists
    pub fn exists(&self, file: &FileRef) -> bool {
        self.files.contains_key(file)
    }

    /// Get the number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if filesystem is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over all files in reference order
    pub fn files(&self) -> impl Iterator<Item = (&FileRef, &File)> {
        self.files.iter()
    }
}

impl SchemaSource for MemoryFS {
    fn read_schema(&self, file: &FileRef) -> io::Result<String> {
        let entry = self.files.get(file).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not in memory", file))
        })?;
        String::from_utf8(entry.content.clone())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
