//! Metadata extraction and key-set validation.
//!
//! Each logging function takes its metadata in a different position:
//!
//! | call                          | metadata argument |
//! |-------------------------------|-------------------|
//! | `metadata(meta)`              | 1st               |
//! | `log(level, message, meta)`   | 3rd               |
//! | `log(...)`, any other arity   | none, skipped     |
//! | `fun(message, meta)`          | 2nd               |
//! | `fun(...)`, any other arity   | none, skipped     |
//!
//! Only keys are checked. Values never matter.

use crate::ast::Ast;
use crate::config::MetadataKeys;

use super::classifier::LoggerCall;
use super::diagnostic::Diagnostic;

/// Pick the argument that carries metadata, or `None` when the call shape is ambiguous.
pub fn metadata_argument<'ast>(function: &str, args: &'ast [Ast]) -> Option<&'ast Ast> {
    match (function, args) {
        ("metadata", [meta]) => Some(meta),
        ("log", [_level, _message, meta]) => Some(meta),
        ("log", _) => None,
        (_, [_message, meta]) => Some(meta),
        _ => None,
    }
}

/// Keys of a keyword list literal, in order.
///
/// Returns `None` unless `ast` is a list whose every element is a
/// `{atom, value}` pair. The empty list is a keyword list.
pub fn keyword_keys(ast: &Ast) -> Option<Vec<&str>> {
    let Ast::List(items) = ast else {
        return None;
    };
    items
        .iter()
        .map(|item| match item {
            Ast::Tuple(pair) => match pair.as_slice() {
                [Ast::Atom(key), _value] => Some(key.as_str()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Whether the backend will render every key of `meta`.
///
/// Anything that is not a keyword literal (a variable, a map, a function call)
/// cannot be checked statically and is invalid.
pub fn is_valid_metadata(meta: &Ast, allowed: &MetadataKeys) -> bool {
    keyword_keys(meta).is_some_and(|keys| keys.into_iter().all(|key| allowed.allows(key)))
}

/// Validate one logging call. Returns a diagnostic at the call's line on failure.
pub fn validate_call(call: &LoggerCall<'_>, allowed: &MetadataKeys) -> Option<Diagnostic> {
    let meta = metadata_argument(call.function, call.args)?;
    if is_valid_metadata(meta, allowed) {
        None
    } else {
        Some(Diagnostic::at(call.line))
    }
}
