//! Whole-file traversal for the metadata check.
//!
//! State is threaded by value through [`prewalk`]. At each node the classifier
//! decides what the node is:
//! - a logging call is validated and may append a diagnostic
//! - `import Logger` switches on unqualified recognition
//! - anything else leaves the state untouched
//!
//! The import flag is never switched back off within a file, even when the
//! import's lexical scope (a nested module or function) has ended. This is
//! stricter than Elixir's scoping and is kept as-is: later bare calls such as
//! `error("x", meta)` in a sibling module are still checked.

use crate::ast::Ast;
use crate::config::CheckConfig;
use crate::visit::prewalk;

use super::classifier::{classify, Classification};
use super::diagnostic::Diagnostic;
use super::validator::validate_call;

/// Accumulator carried through one file's traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalState {
    /// Set once `import Logger` has been seen.
    pub logger_imported: bool,
    /// Findings in discovery order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Advance `state` past one node.
pub fn step(ast: &Ast, state: TraversalState, config: &CheckConfig) -> TraversalState {
    let TraversalState {
        logger_imported,
        mut diagnostics,
    } = state;

    match classify(ast, logger_imported, config) {
        Classification::Import => TraversalState {
            logger_imported: true,
            diagnostics,
        },
        class @ (Classification::QualifiedCall(_) | Classification::UnqualifiedCall(_)) => {
            if let Some(diagnostic) = class
                .call()
                .and_then(|call| validate_call(call, &config.allowed))
            {
                diagnostics.push(diagnostic);
            }
            TraversalState {
                logger_imported,
                diagnostics,
            }
        }
        Classification::Other => TraversalState {
            logger_imported,
            diagnostics,
        },
    }
}

/// Walk the whole tree from `state` and return the final state.
pub fn traverse(root: &Ast, state: TraversalState, config: &CheckConfig) -> TraversalState {
    prewalk(root, state, |ast, state| step(ast, state, config))
}

/// Run the check on one file's AST. Diagnostics come back in line order.
pub fn check_ast(root: &Ast, config: &CheckConfig) -> Vec<Diagnostic> {
    let state = traverse(root, TraversalState::default(), config);
    order_by_line(state.diagnostics)
}

/// Stable sort by ascending line; diagnostics without a line go last.
pub fn order_by_line(mut diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    diagnostics.sort_by_key(|d| (d.line.is_none(), d.line));
    diagnostics
}
