//! Structural classification of logging calls and logger imports.
//!
//! Recognized shapes:
//! - Qualified calls: `Logger.error(...)`
//! - Unqualified calls: `error(...)`, only once `import Logger` has been seen
//! - Imports: `import Logger` with nothing else (no `only:`/`except:` options)
//!
//! Everything else classifies as [`Classification::Other`].

use crate::ast::{Ast, Node, DOT, IMPORT};
use crate::config::CheckConfig;

/// A recognized call into the logger module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoggerCall<'ast> {
    /// Logging function name (`error`, `log`, `metadata`, ...)
    pub function: &'ast str,
    /// Call arguments in source order
    pub args: &'ast [Ast],
    /// Line of the call node
    pub line: Option<u32>,
}

/// What one node means to the check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification<'ast> {
    /// `Logger.fun(args...)`
    QualifiedCall(LoggerCall<'ast>),
    /// `fun(args...)` after `import Logger`
    UnqualifiedCall(LoggerCall<'ast>),
    /// `import Logger`
    Import,
    /// Anything else
    Other,
}

impl<'ast> Classification<'ast> {
    /// The logging call, for either call shape.
    pub fn call(&self) -> Option<&LoggerCall<'ast>> {
        match self {
            Self::QualifiedCall(call) | Self::UnqualifiedCall(call) => Some(call),
            Self::Import | Self::Other => None,
        }
    }
}

/// Classify one node given whether the logger module is imported at this point.
pub fn classify<'ast>(
    ast: &'ast Ast,
    logger_imported: bool,
    config: &CheckConfig,
) -> Classification<'ast> {
    let Ast::Node(node) = ast else {
        return Classification::Other;
    };
    // Variable references have no argument list and are never calls.
    let Some(args) = node.args() else {
        return Classification::Other;
    };

    match node.form.as_ref() {
        Ast::Node(callee) => match remote_function(callee, config) {
            Some(function) if config.is_logging_function(function) => {
                Classification::QualifiedCall(LoggerCall {
                    function,
                    args,
                    line: node.meta.line,
                })
            }
            _ => Classification::Other,
        },
        Ast::Atom(form) if form == IMPORT => match args {
            [module] if is_logger_alias(module, config) => Classification::Import,
            _ => Classification::Other,
        },
        Ast::Atom(function) if logger_imported && config.is_logging_function(function) => {
            Classification::UnqualifiedCall(LoggerCall {
                function,
                args,
                line: node.meta.line,
            })
        }
        _ => Classification::Other,
    }
}

/// For a `{:., _, [alias, :fun]}` callee on the logger module, return `fun`.
fn remote_function<'ast>(callee: &'ast Node, config: &CheckConfig) -> Option<&'ast str> {
    if callee.form_atom() != Some(DOT) {
        return None;
    }
    match callee.args()? {
        [module, Ast::Atom(function)] if is_logger_alias(module, config) => Some(function.as_str()),
        _ => None,
    }
}

/// Whether `ast` is the alias naming the configured logger module.
fn is_logger_alias(ast: &Ast, config: &CheckConfig) -> bool {
    ast.as_node()
        .and_then(Node::alias_segments)
        .is_some_and(|segments| segments.into_iter().eq(config.logger_module.split('.')))
}
