//! Pre-order traversal over quoted-form trees.
//!
//! [`prewalk`] threads an owned state value through every node, replacing it
//! at each step. Every node reachable from the root is visited exactly once,
//! parents before children, children left to right. For a `{form, meta, args}`
//! node the form is visited before the arguments, so `Logger.error(...)` visits
//! the call, then the `.` callee, then the alias, then the arguments.

use crate::ast::Ast;

/// Walk `root` in pre-order, threading `state` through `f` at every node.
///
/// The tree is borrowed, never rewritten; only the state changes.
pub fn prewalk<'ast, S, F>(root: &'ast Ast, state: S, mut f: F) -> S
where
    F: FnMut(&'ast Ast, S) -> S,
{
    walk(root, state, &mut f)
}

fn walk<'ast, S, F>(ast: &'ast Ast, state: S, f: &mut F) -> S
where
    F: FnMut(&'ast Ast, S) -> S,
{
    let state = f(ast, state);
    match ast {
        Ast::List(items) | Ast::Tuple(items) => {
            items.iter().fold(state, |state, item| walk(item, state, &mut *f))
        }
        Ast::Node(node) => {
            let state = walk(&node.form, state, f);
            match &node.args {
                Some(args) => args.iter().fold(state, |state, arg| walk(arg, state, &mut *f)),
                None => state,
            }
        }
        Ast::Atom(_) | Ast::Integer(_) | Ast::Float(_) | Ast::String(_) => state,
    }
}
