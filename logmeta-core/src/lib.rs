//! logmeta-core: finds Elixir `Logger` calls whose metadata the backend will drop.
//!
//! A logging backend renders only the metadata keys in its configured
//! allow-list. `Logger.error("boom", user_id: 7)` against an allow-list of
//! `[:request_id]` silently loses `user_id` in production. This library walks a
//! parsed file, recognizes logging calls and reports each one whose metadata is
//! not a keyword literal made entirely of allowed keys.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use logmeta_core::prelude::*;
//!
//! let result = MetadataCheck::new("/path/to/project")
//!     .metadata_keys(["request_id"])
//!     .analyze()?;
//!
//! for report in result.with_issues() {
//!     for diag in &report.diagnostics {
//!         println!("{}:{:?}: {}", report.path.display(), diag.line, diag.message);
//!     }
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`ast`]: quoted-form AST model and constructors
//! - [`visit`]: pre-order traversal threading state
//! - [`logger`]: classifier, metadata validator and the per-file check
//! - [`parse`]: decoding external parser output
//! - [`scan`]: parallel discovery of AST documents
//! - [`config`]: logmeta.toml and rule parameter resolution
//! - [`builder`]: fluent API for project-wide runs
//! - [`report`]: plain text and JSON output
//! - [`error`]: typed error handling

pub mod ast;
pub mod builder;
pub mod config;
pub mod error;
pub mod logger;
pub mod logging;
pub mod parse;
pub mod prelude;
pub mod report;
pub mod scan;
pub mod visit;

// Error types
pub use error::{IoResultExt, LogmetaError, LogmetaResult};

// AST model
pub use ast::{Ast, Meta, Node};

// Builder API
pub use builder::{check_file, check_tree, AnalysisResult, FileReport, MetadataCheck, SkippedFile};

// Configuration
pub use config::{
    load_config, CheckConfig, LoggerConfig, LogmetaConfig, MetadataKeys, OutputConfig,
    RuleParams, DEFAULT_LOGGER_MODULE, LOGGER_FUNCTIONS,
};

// The check
pub use logger::{check_ast, classify, Classification, Diagnostic, LoggerCall, TraversalState};

// Logging
pub use logging::init_structured_logging;

// Parsing
pub use parse::{load_ast_file, parse_ast_str};

// Reporting
pub use report::{print_json, print_plain, render_json, render_plain};

// File scanning
pub use scan::{gather_ast_files, gather_ast_files_with_excludes, is_ast_file, AST_FILE_SUFFIX};

// Traversal
pub use visit::prewalk;

#[cfg(test)]
mod tests;
