// Copyright 2024 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! EXPORTED_FUNCTIONS manifest generation.
//!
//! Every line holding the export marker contributes the last space-separated
//! word before its first `(`. Only plain spaces separate words, so a tab stays
//! inside the name and a space before `(` yields an empty one. Nothing checks
//! that the word is an identifier: a marker line of another shape (a macro
//! definition, a declaration split over two lines) still contributes whatever
//! word sits in that position.

use std::fs;
use std::path::Path;

use crate::config::ResolvedExport;
use crate::{walk, Error};

/// Returns the exported name declared on `line`, or `None` without a marker.
pub fn extract_export_name(line: &str, marker: &str) -> Option<String> {
    let start = line.find(marker)? + marker.len();
    let rest = &line[start..];
    let head = rest.split('(').next().unwrap_or(rest);
    Some(head.rsplit(' ').next().unwrap_or_default().to_string())
}

/// Collects exported names below `source_dir` in traversal and line order.
///
/// A missing `source_dir` is not an error: it simply exports nothing.
pub fn exported_functions(source_dir: &Path, marker: &str) -> Result<Vec<String>, Error> {
    let mut functions = Vec::new();
    for entry in walk::files(source_dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::debug!("cmake-export: skipping {}: {err}", source_dir.display());
                continue;
            }
        };
        let path = entry.path();
        let text = fs::read_to_string(path)
            .map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
        let before = functions.len();
        functions.extend(text.lines().filter_map(|line| extract_export_name(line, marker)));
        log::debug!("cmake-export: {} exports in {}", functions.len() - before, path.display());
    }
    Ok(functions)
}

/// Renders the CMake directive consumed by the binding build.
pub fn render_manifest<S: AsRef<str>>(names: &[S]) -> String {
    let quoted: Vec<String> = names.iter().map(|name| format!("'_{}'", name.as_ref())).collect();
    format!("set(EXPORTED_FUNCTIONS\n\"{}\"\n)\n", quoted.join(", "))
}

pub fn write_manifest<S: AsRef<str>>(path: &Path, names: &[S]) -> Result<(), Error> {
    fs::write(path, render_manifest(names))
        .map_err(|source| Error::Write { path: path.to_path_buf(), source })
}

/// Scans, filters and writes the manifest; returns the names written.
pub fn generate(config: &ResolvedExport) -> Result<Vec<String>, Error> {
    let mut functions = exported_functions(&config.source_dir, &config.marker)?;
    functions.retain(|name| !config.ignored.contains(name));
    write_manifest(&config.output, &functions)?;
    log::info!(
        "cmake-export: wrote {} functions to {}",
        functions.len(),
        config.output.display()
    );
    Ok(functions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MARKER: &str = "CHFL_EXPORT";

    #[test]
    fn extracts_word_before_parenthesis() {
        let name = extract_export_name("CHFL_EXPORT void chfl_atom_new(void);", MARKER);
        assert_eq!(name.as_deref(), Some("chfl_atom_new"));

        let name = extract_export_name(
            "CHFL_EXPORT chfl_status chfl_atom_mass(const CHFL_ATOM* atom, double* mass);",
            MARKER,
        );
        assert_eq!(name.as_deref(), Some("chfl_atom_mass"));
    }

    #[test]
    fn lines_without_marker_are_ignored() {
        assert_eq!(extract_export_name("void chfl_private(void);", MARKER), None);
        assert_eq!(extract_export_name("", MARKER), None);
    }

    #[test]
    fn odd_marker_lines_are_kept_as_is() {
        // Declaration continued on the next line: last word of the whole remainder.
        let name = extract_export_name("CHFL_EXPORT CHFL_ATOM*", MARKER);
        assert_eq!(name.as_deref(), Some("CHFL_ATOM*"));
        // Nothing after the marker.
        assert_eq!(extract_export_name("#define CHFL_EXPORT", MARKER).as_deref(), Some(""));
        // Space before the parenthesis.
        let name = extract_export_name("CHFL_EXPORT void chfl_free (void* object);", MARKER);
        assert_eq!(name.as_deref(), Some(""));
        // Tabs do not separate words.
        let name = extract_export_name("CHFL_EXPORT chfl_status\tchfl_atom_mass(void);", MARKER);
        assert_eq!(name.as_deref(), Some("chfl_status\tchfl_atom_mass"));
    }

    #[test]
    fn empty_manifest_layout() {
        assert_eq!(render_manifest::<&str>(&[]), "set(EXPORTED_FUNCTIONS\n\"\"\n)\n");
    }

    #[test]
    fn manifest_joins_underscored_names() {
        assert_eq!(
            render_manifest(&["chfl_atom_new", "chfl_atom_free"]),
            "set(EXPORTED_FUNCTIONS\n\"'_chfl_atom_new', '_chfl_atom_free'\"\n)\n"
        );
    }

    #[test]
    fn collects_in_traversal_and_line_order_with_duplicates() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("types")).unwrap();
        fs::write(
            root.join("atom.h"),
            "// header\nCHFL_EXPORT CHFL_ATOM* chfl_atom(const char* name);\n\
             CHFL_EXPORT chfl_status chfl_atom_free(CHFL_ATOM* atom);\n",
        )
        .unwrap();
        fs::write(root.join("types/misc.h"), "CHFL_EXPORT void chfl_free(const void* object);\n")
            .unwrap();
        fs::write(
            root.join("zz.h"),
            "CHFL_EXPORT void chfl_free(const void* object);\nCHFL_EXPORT void chfl_zz(void);\n",
        )
        .unwrap();

        let names = exported_functions(root, MARKER).unwrap();
        assert_eq!(names, vec!["chfl_atom", "chfl_atom_free", "chfl_free", "chfl_zz", "chfl_free"]);
    }

    #[test]
    fn missing_tree_exports_nothing() {
        let temp = TempDir::new().unwrap();
        let names = exported_functions(&temp.path().join("absent"), MARKER).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn generate_drops_ignored_names_and_overwrites_output() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("capi")).unwrap();
        fs::write(
            root.join("capi/frame.h"),
            "CHFL_EXPORT CHFL_FRAME* chfl_frame(void);\nCHFL_EXPORT void chfl_frame_debug(void);\n",
        )
        .unwrap();
        let output = root.join("exported.cmake");
        fs::write(&output, "stale").unwrap();

        let config = ResolvedExport {
            source_dir: root.join("capi"),
            marker: MARKER.to_string(),
            output: output.clone(),
            ignored: vec!["chfl_frame_debug".to_string()],
        };
        let written = generate(&config).unwrap();
        assert_eq!(written, vec!["chfl_frame"]);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "set(EXPORTED_FUNCTIONS\n\"'_chfl_frame'\"\n)\n"
        );
    }

    #[test]
    fn unwritable_output_is_reported() {
        let temp = TempDir::new().unwrap();
        let config = ResolvedExport {
            source_dir: temp.path().to_path_buf(),
            marker: MARKER.to_string(),
            output: temp.path().join("missing-dir/exported.cmake"),
            ignored: Vec::new(),
        };
        assert!(matches!(generate(&config), Err(Error::Write { .. })));
    }
}
