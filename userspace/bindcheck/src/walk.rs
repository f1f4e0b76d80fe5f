// Copyright 2024 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Deterministic file traversal shared by both checks.
//!
//! Within a directory, files come before sub-directories and both are
//! visited in file-name order. Directory symlinks are not followed; file
//! symlinks are read like regular files. A dangling symlink points at no
//! file and is skipped.

use std::cmp::Ordering;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Walks `root` and yields every readable-file entry, passing walk errors through.
pub(crate) fn files(root: &Path) -> impl Iterator<Item = Result<DirEntry, walkdir::Error>> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by(files_first)
        .into_iter()
        .filter(|entry| match entry {
            Ok(entry) => is_file(entry),
            Err(_) => true,
        })
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_key = (a.file_type().is_dir(), a.file_name());
    let b_key = (b.file_type().is_dir(), b.file_name());
    a_key.cmp(&b_key)
}

fn is_file(entry: &DirEntry) -> bool {
    let kind = entry.file_type();
    kind.is_file() || (kind.is_symlink() && entry.path().is_file())
}
