//! Builder pattern API for running the check over a project.
//!
//! ```rust,ignore
//! use logmeta_core::prelude::*;
//!
//! let result = MetadataCheck::new("/path/to/project")
//!     .metadata_keys(["request_id", "user_id"])
//!     .ignore_functions(["debug"])
//!     .analyze()?;
//!
//! println!("{} issue(s)", result.issue_count());
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::ast::Ast;
use crate::config::{load_config, CheckConfig, LoggerConfig, MetadataKeys, RuleParams};
use crate::error::{LogmetaError, LogmetaResult};
use crate::logger::{check_ast, Diagnostic};
use crate::parse::load_ast_file;
use crate::scan::gather_ast_files_with_excludes;

/// Diagnostics for one analysed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// Ordered by ascending line
    pub diagnostics: Vec<Diagnostic>,
}

/// A file that could not be analysed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a project-wide run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisResult {
    /// One entry per analysed file, sorted by path
    pub files: Vec<FileReport>,
    /// Files whose AST could not be loaded
    pub skipped: Vec<SkippedFile>,
}

impl AnalysisResult {
    /// Total number of diagnostics across all files.
    pub fn issue_count(&self) -> usize {
        self.files.iter().map(|f| f.diagnostics.len()).sum()
    }

    /// Reports that contain at least one diagnostic.
    pub fn with_issues(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| !f.diagnostics.is_empty())
    }
}

/// Run the check on an already-decoded tree.
pub fn check_tree(path: impl Into<PathBuf>, ast: &Ast, config: &CheckConfig) -> FileReport {
    FileReport {
        path: path.into(),
        diagnostics: check_ast(ast, config),
    }
}

/// Load one AST document and run the check on it.
pub fn check_file(path: &Path, config: &CheckConfig) -> LogmetaResult<FileReport> {
    let ast = load_ast_file(path)?;
    let report = check_tree(path, &ast, config);
    debug!(
        file = %path.display(),
        issues = report.diagnostics.len(),
        "checked file"
    );
    Ok(report)
}

/// Builder for configuring a project-wide run.
///
/// Settings given here take precedence over `logmeta.toml` at the root.
#[derive(Debug, Clone)]
pub struct MetadataCheck {
    /// Root directory containing the AST documents
    root: PathBuf,

    /// Whether to read logmeta.toml from the root
    use_config_file: bool,

    /// Extra function names to skip
    ignored_functions: BTreeSet<String>,

    /// Allowed metadata keys, overriding every other source
    metadata_keys: Option<MetadataKeys>,

    /// Logger module name override
    logger_module: Option<String>,

    /// Custom excluded directories
    excluded_dirs: Vec<String>,
}

impl MetadataCheck {
    /// Create a new run for the given path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            use_config_file: true,
            ignored_functions: BTreeSet::new(),
            metadata_keys: None,
            logger_module: None,
            excluded_dirs: Vec::new(),
        }
    }

    /// Enable or disable reading logmeta.toml.
    pub fn with_config_file(mut self, enabled: bool) -> Self {
        self.use_config_file = enabled;
        self
    }

    /// Logging functions to leave unchecked.
    pub fn ignore_functions(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ignored_functions.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the allowed metadata keys explicitly.
    pub fn metadata_keys(mut self, keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.metadata_keys = Some(MetadataKeys::only(keys));
        self
    }

    /// Treat every metadata key as rendered by the backend.
    pub fn all_metadata_keys(mut self) -> Self {
        self.metadata_keys = Some(MetadataKeys::All);
        self
    }

    /// Use a logger module other than `Logger`.
    pub fn logger_module(mut self, module: impl Into<String>) -> Self {
        self.logger_module = Some(module.into());
        self
    }

    /// Add directories to exclude from scanning.
    pub fn exclude_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Resolve the effective configuration: builder settings over logmeta.toml over defaults.
    pub fn resolve_config(&self) -> LogmetaResult<CheckConfig> {
        let file = if self.use_config_file {
            load_config(&self.root)?
        } else {
            None
        };

        let mut params: RuleParams = file
            .as_ref()
            .and_then(|c| c.rule.clone())
            .unwrap_or_default();
        params.ignore_functions.extend(self.ignored_functions.iter().cloned());
        if let Some(keys) = &self.metadata_keys {
            params.metadata_keys = Some(keys.clone());
        }

        let logger: LoggerConfig = file
            .as_ref()
            .and_then(|c| c.logger.clone())
            .unwrap_or_default();

        let module = self
            .logger_module
            .clone()
            .or_else(|| file.as_ref().and_then(|c| c.logger_module.clone()));

        let config = CheckConfig::resolve(&params, &logger);
        match module {
            Some(m) if m.trim().is_empty() => Err(LogmetaError::invalid_argument(
                "logger module name must not be empty",
            )),
            Some(m) => Ok(config.with_logger_module(m)),
            None => Ok(config),
        }
    }

    /// Run the analysis and return results.
    pub fn analyze(&self) -> LogmetaResult<AnalysisResult> {
        let config = self.resolve_config()?;

        let excludes: Vec<&str> = self.excluded_dirs.iter().map(String::as_str).collect();
        let files = gather_ast_files_with_excludes(&self.root, &excludes)?;
        info!(
            root = %self.root.display(),
            files = files.len(),
            "starting metadata check"
        );

        // Each file is independent; nothing is shared between traversals.
        let outcomes: Vec<LogmetaResult<FileReport>> =
            files.par_iter().map(|path| check_file(path, &config)).collect();

        let mut result = AnalysisResult::default();
        for outcome in outcomes {
            match outcome {
                Ok(report) => result.files.push(report),
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "skipping file");
                    result.skipped.push(SkippedFile {
                        path: e.path().cloned().unwrap_or_default(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            files = result.files.len(),
            skipped = result.skipped.len(),
            issues = result.issue_count(),
            "metadata check finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;

    #[test]
    fn test_check_tree() {
        let ast = qualified_call("Logger", "info", 9, vec![string("x"), var("meta", 9)]);
        let report = check_tree("lib/a.ex", &ast, &CheckConfig::default());
        assert_eq!(report.path, PathBuf::from("lib/a.ex"));
        assert_eq!(report.diagnostics, vec![Diagnostic::at(Some(9))]);
    }

    #[test]
    fn test_builder_overrides_without_config_file() {
        let config = MetadataCheck::new("/nonexistent")
            .with_config_file(false)
            .ignore_functions(["debug"])
            .metadata_keys(["request_id"])
            .logger_module("MyApp.Log")
            .resolve_config()
            .unwrap();
        assert!(!config.is_logging_function("debug"));
        assert!(config.allowed.allows("request_id"));
        assert_eq!(config.logger_module, "MyApp.Log");
    }

    #[test]
    fn test_all_metadata_keys() {
        let config = MetadataCheck::new("/nonexistent")
            .with_config_file(false)
            .all_metadata_keys()
            .resolve_config()
            .unwrap();
        assert_eq!(config.allowed, MetadataKeys::All);
    }

    #[test]
    fn test_empty_logger_module_rejected() {
        let err = MetadataCheck::new("/nonexistent")
            .with_config_file(false)
            .logger_module("  ")
            .resolve_config()
            .unwrap_err();
        assert!(matches!(err, LogmetaError::InvalidArgument { .. }));
    }

    #[test]
    fn test_issue_count() {
        let result = AnalysisResult {
            files: vec![
                FileReport {
                    path: "a".into(),
                    diagnostics: vec![Diagnostic::at(Some(1)), Diagnostic::at(Some(2))],
                },
                FileReport {
                    path: "b".into(),
                    diagnostics: vec![],
                },
            ],
            skipped: vec![],
        };
        assert_eq!(result.issue_count(), 2);
        assert_eq!(result.with_issues().count(), 1);
    }
}
