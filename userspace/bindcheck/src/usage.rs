// Copyright 2024 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Binding usage check: every native function listed in the declarations
//! file must be called somewhere in the binding sources.
//!
//! Declarations are lines of the form `// '<prefix>name'`; calls are any
//! `_<prefix>...(` in a binding file, wherever it appears.

use regex::Regex;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::ResolvedUsage;
use crate::{walk, Error};

/// Outcome of a usage check. Missing names are data, not errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageReport {
    pub missing: Vec<String>,
}

impl UsageReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }

    /// One `Missing: <name>` line per unused function.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.missing.iter().map(|name| format!("Missing: {name}"))
    }
}

impl fmt::Display for UsageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Reads the underscore-prefixed names declared in `declarations`, in file order.
pub fn expected_functions(declarations: &Path, prefix: &str) -> Result<Vec<String>, Error> {
    let text = fs::read_to_string(declarations)
        .map_err(|source| Error::Read { path: declarations.to_path_buf(), source })?;
    let tag = format!("// '{prefix}");
    let functions = text
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(&tag))
        .map(|line| format!("_{}", line.split('\'').nth(1).unwrap_or_default()))
        .collect();
    Ok(functions)
}

/// Matches `_<prefix>` followed by letters, digits, underscores or spaces and `(`.
pub fn reference_pattern(prefix: &str) -> Result<Regex, Error> {
    let pattern = format!(r"(_{}[a-zA-Z0-9 _]*)\(", regex::escape(prefix));
    Ok(Regex::new(&pattern)?)
}

/// Collects every distinct reference in files below `binding_dir` whose name
/// ends with `extension`, skipping any file named `exclude_name`.
pub fn binding_functions(
    binding_dir: &Path,
    exclude_name: &OsStr,
    extension: &str,
    pattern: &Regex,
) -> Result<BTreeSet<String>, Error> {
    if !binding_dir.is_dir() {
        return Err(Error::MissingDir(binding_dir.to_path_buf()));
    }
    let mut functions = BTreeSet::new();
    for entry in walk::files(binding_dir) {
        let entry = entry.map_err(|source| Error::Walk {
            path: source.path().unwrap_or(binding_dir).to_path_buf(),
            source,
        })?;
        let name = entry.file_name();
        if name == exclude_name || !name.to_str().is_some_and(|n| n.ends_with(extension)) {
            continue;
        }
        let path = entry.path();
        let text = fs::read_to_string(path)
            .map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
        for captures in pattern.captures_iter(&text) {
            if let Some(found) = captures.get(1) {
                functions.insert(found.as_str().to_string());
            }
        }
        log::debug!("check-used-functions: scanned {}", path.display());
    }
    Ok(functions)
}

/// Expected names that are neither referenced nor ignored, in expected order.
pub fn missing_functions(
    expected: &[String],
    references: &BTreeSet<String>,
    ignored: &[String],
) -> Vec<String> {
    expected
        .iter()
        .filter(|name| !references.contains(*name) && !ignored.contains(*name))
        .cloned()
        .collect()
}

/// Runs the full check described by `config`.
pub fn check(config: &ResolvedUsage) -> Result<UsageReport, Error> {
    let expected = expected_functions(&config.declarations, &config.prefix)?;
    let pattern = reference_pattern(&config.prefix)?;
    let exclude = config.declarations.file_name().unwrap_or_default();
    let references = binding_functions(&config.binding_dir, exclude, &config.extension, &pattern)?;
    log::info!(
        "check-used-functions: {} declared, {} referenced",
        expected.len(),
        references.len()
    );
    let missing = missing_functions(&expected, &references, &config.ignored);
    Ok(UsageReport { missing })
}
