//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use logmeta_core::prelude::*;
//! ```

// Core types
pub use crate::ast::Ast;
pub use crate::error::{LogmetaError, LogmetaResult};
pub use crate::logger::{check_ast, Diagnostic};

// Configuration
pub use crate::config::{load_config, CheckConfig, LoggerConfig, MetadataKeys, RuleParams};

// Builder API
pub use crate::builder::{check_file, AnalysisResult, FileReport, MetadataCheck};
