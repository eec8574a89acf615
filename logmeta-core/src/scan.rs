//! Parallel, deterministic discovery of AST documents with directory pruning.
//!
//! - Early directory pruning via `WalkDir::filter_entry` (O(1) subtree skip)
//! - Parallel file processing via Rayon's `par_bridge`
//! - Results sorted by path so runs are reproducible

use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{LogmetaError, LogmetaResult};

/// Suffix of parser output files.
pub const AST_FILE_SUFFIX: &str = ".ast.json";

/// Directories to exclude by default (Mix build output, dependencies, tooling).
const EXCLUDED_DIRS: &[&str] = &["_build", "deps", ".git", "node_modules", ".elixir_ls"];

#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    entry.file_type().is_dir()
        && entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excludes.contains(name))
}

/// Whether `path` names a parser output file.
pub fn is_ast_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(AST_FILE_SUFFIX) && n.len() > AST_FILE_SUFFIX.len())
}

/// Gathers all AST documents under `root`, skipping the default excluded directories.
pub fn gather_ast_files(root: &Path) -> LogmetaResult<Vec<PathBuf>> {
    gather_ast_files_with_excludes(root, &[])
}

/// Gathers all AST documents with additional excluded directory names.
pub fn gather_ast_files_with_excludes(root: &Path, excludes: &[&str]) -> LogmetaResult<Vec<PathBuf>> {
    let all_excludes: HashSet<&str> = EXCLUDED_DIRS
        .iter()
        .copied()
        .chain(excludes.iter().copied())
        .collect();

    let mut files = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, &all_excludes))
        .par_bridge()
        .filter_map(|entry| match entry {
            Ok(e) => {
                let path = e.path();
                if e.file_type().is_file() && is_ast_file(path) {
                    Some(Ok(path.to_path_buf()))
                } else {
                    None
                }
            }
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                Some(Err(match e.into_io_error() {
                    Some(io) => LogmetaError::io(path, io),
                    None => LogmetaError::io(
                        path,
                        std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"),
                    ),
                }))
            }
        })
        .collect::<LogmetaResult<Vec<_>>>()?;

    files.sort();
    Ok(files)
}
