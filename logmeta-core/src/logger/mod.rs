//! Logger metadata check.
//!
//! Finds logging calls whose metadata keys the logging backend will drop
//! because they are not in its configured allow-list.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐     ┌─────────────────────┐
//! │   classifier.rs     │     │    validator.rs     │
//! │  ─────────────────  │     │  ─────────────────  │
//! │  Logger.fun(...)    │     │  Pick metadata arg, │
//! │  fun(...) + import  │     │  check keyword keys │
//! └──────────┬──────────┘     └──────────┬──────────┘
//!            │                           │
//!            └───────────┬───────────────┘
//!                        ▼
//!            ┌─────────────────────┐
//!            │      check.rs       │
//!            │  ─────────────────  │
//!            │  Pre-order walk,    │
//!            │  import flag, diags │
//!            └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use logmeta_core::logger::check_ast;
//! use logmeta_core::{CheckConfig, LoggerConfig, MetadataKeys, RuleParams};
//!
//! let logger = LoggerConfig { metadata: MetadataKeys::only(["request_id"]) };
//! let config = CheckConfig::resolve(&RuleParams::default(), &logger);
//!
//! for diag in check_ast(&ast, &config) {
//!     println!("{:?}: {}", diag.line, diag.message);
//! }
//! ```

pub mod check;
pub mod classifier;
pub mod diagnostic;
pub mod validator;

pub use check::{check_ast, order_by_line, step, traverse, TraversalState};
pub use classifier::{classify, Classification, LoggerCall};
pub use diagnostic::{Diagnostic, MESSAGE};
pub use validator::{is_valid_metadata, keyword_keys, metadata_argument, validate_call};
