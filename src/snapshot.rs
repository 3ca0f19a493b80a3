//! Repository file snapshot
//!
//! A [`FileSnapshot`] is the engine's only view of a repository: the subset of
//! root-level files matching a language's indicator names, mapped to their raw
//! textual content, plus the names of matching root-level directories (Go's
//! `vendor/` convention is signalled by a directory, not a file).
//!
//! Snapshots are built once by the file-index provider (or directly by tests)
//! and are read-only afterwards. An absent key means "file not present" —
//! never an empty string.

use std::collections::{BTreeMap, BTreeSet};

/// Immutable view of a repository's root-level indicator files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSnapshot {
    files: BTreeMap<String, String>,
    dirs: BTreeSet<String>,
}

impl FileSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from `(name, content)` pairs. Test convenience.
    pub fn from_files<I, K, V>(files: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut snapshot = Self::new();
        for (name, content) in files {
            snapshot.insert_file(name, content);
        }
        snapshot
    }

    /// Records a root-level file and its content.
    pub fn insert_file(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.files.insert(name.into(), content.into());
    }

    /// Records a root-level directory by name.
    pub fn insert_dir(&mut self, name: impl Into<String>) {
        self.dirs.insert(name.into());
    }

    /// Content of a file, if present.
    pub fn content(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    /// Whether any entry (file or directory) with this name is present.
    pub fn has(&self, name: &str) -> bool {
        self.files.contains_key(name) || self.dirs.contains(name)
    }

    /// Whether a directory with this name is present.
    pub fn has_dir(&self, name: &str) -> bool {
        self.dirs.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }

    /// Number of entries (files and directories).
    pub fn len(&self) -> usize {
        self.files.len() + self.dirs.len()
    }

    /// Iterates file names in sorted order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}
