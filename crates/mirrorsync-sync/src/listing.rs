//! One-level directory enumeration.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use mirrorsync_core::{DirectoryEntry, FileEntry, NameMatching, SyncError};

/// A fresh enumeration of one directory's children.
///
/// Entries are sorted by name. Symbolic links are classified by their target.
/// Links whose target cannot be resolved are kept apart as dangling links;
/// anything else that is neither a file nor a directory is skipped.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    path: PathBuf,
    matching: NameMatching,
    files: Vec<FileEntry>,
    directories: Vec<DirectoryEntry>,
    dangling_links: Vec<FileEntry>,
    file_index: HashMap<OsString, usize>,
    directory_index: HashMap<OsString, usize>,
}

impl DirectoryListing {
    /// List the direct children of `path`.
    pub fn read(path: &Path, matching: NameMatching) -> Result<Self, SyncError> {
        let mut files = Vec::new();
        let mut directories = Vec::new();
        let mut dangling_links = Vec::new();

        let entries = fs::read_dir(path).map_err(|e| SyncError::io(path, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| SyncError::io(path, e))?;
            let child = entry.path();

            let metadata = match fs::metadata(&child) {
                Ok(metadata) => metadata,
                Err(e) => {
                    let is_link = entry.file_type().is_ok_and(|t| t.is_symlink());
                    if is_link {
                        dangling_links.push(FileEntry::new(entry.file_name(), child, 0));
                    } else {
                        tracing::debug!(
                            path = %child.display(),
                            error = %e,
                            "skipping unresolvable entry"
                        );
                    }
                    continue;
                }
            };

            if metadata.is_file() {
                files.push(FileEntry::new(entry.file_name(), child, metadata.len()));
            } else if metadata.is_dir() {
                directories.push(DirectoryEntry::new(entry.file_name(), child));
            }
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        directories.sort_by(|a, b| a.name.cmp(&b.name));
        dangling_links.sort_by(|a, b| a.name.cmp(&b.name));

        let file_index = index(files.iter().map(|f| f.name()), matching);
        let directory_index = index(directories.iter().map(|d| d.name()), matching);

        Ok(Self {
            path: path.to_path_buf(),
            matching,
            files,
            directories,
            dangling_links,
            file_index,
            directory_index,
        })
    }

    /// The listed directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Child files, sorted by name.
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Child directories, sorted by name.
    pub fn directories(&self) -> &[DirectoryEntry] {
        &self.directories
    }

    /// Symbolic links whose target does not resolve, sorted by name.
    pub fn dangling_links(&self) -> &[FileEntry] {
        &self.dangling_links
    }

    /// Find a child file matching `name`.
    pub fn file(&self, name: &OsStr) -> Option<&FileEntry> {
        self.file_index
            .get(&self.matching.key(name))
            .map(|&i| &self.files[i])
    }

    /// Find a child directory matching `name`.
    pub fn directory(&self, name: &OsStr) -> Option<&DirectoryEntry> {
        self.directory_index
            .get(&self.matching.key(name))
            .map(|&i| &self.directories[i])
    }

    /// Check whether a child file matches `name`.
    pub fn has_file(&self, name: &OsStr) -> bool {
        self.file(name).is_some()
    }

    /// Check whether a child directory matches `name`.
    pub fn has_directory(&self, name: &OsStr) -> bool {
        self.directory(name).is_some()
    }
}

fn index<'a>(
    names: impl Iterator<Item = &'a OsStr>,
    matching: NameMatching,
) -> HashMap<OsString, usize> {
    let mut index = HashMap::new();
    for (i, name) in names.enumerate() {
        // First entry wins when folding makes two names collide
        index.entry(matching.key(name)).or_insert(i);
    }
    index
}
