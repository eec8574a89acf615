//! Constructors for quoted-form trees.
//!
//! Used by tests and by callers that build trees in code instead of
//! decoding them from a parser's JSON output.

use super::{Ast, Meta, Node, ALIASES, DOT, IMPORT};

pub fn atom(name: &str) -> Ast {
    Ast::Atom(name.to_string())
}

pub fn string(value: &str) -> Ast {
    Ast::String(value.to_string())
}

pub fn int(value: i64) -> Ast {
    Ast::Integer(value)
}

pub fn list(items: Vec<Ast>) -> Ast {
    Ast::List(items)
}

pub fn tuple(items: Vec<Ast>) -> Ast {
    Ast::Tuple(items)
}

/// A node with an explicit form, meta and argument list.
pub fn node(form: Ast, meta: Meta, args: Option<Vec<Ast>>) -> Ast {
    Ast::Node(Node {
        form: Box::new(form),
        meta,
        args,
    })
}

/// Variable reference: `{:name, [line: n], nil}`.
pub fn var(name: &str, line: u32) -> Ast {
    node(atom(name), Meta::at_line(line), None)
}

/// Alias such as `Logger` or `Foo.Bar`.
pub fn alias(segments: &[&str]) -> Ast {
    node(
        atom(ALIASES),
        Meta::default(),
        Some(segments.iter().map(|s| atom(s)).collect()),
    )
}

/// Local (unqualified) call: `fun(args...)`.
pub fn call(fun: &str, line: u32, args: Vec<Ast>) -> Ast {
    node(atom(fun), Meta::at_line(line), Some(args))
}

/// Remote (qualified) call: `Module.fun(args...)`.
pub fn qualified_call(module: &str, fun: &str, line: u32, args: Vec<Ast>) -> Ast {
    let segments: Vec<&str> = module.split('.').collect();
    let callee = node(
        atom(DOT),
        Meta::at_line(line),
        Some(vec![alias(&segments), atom(fun)]),
    );
    node(callee, Meta::at_line(line), Some(args))
}

/// `import Module`.
pub fn import(module: &str, line: u32) -> Ast {
    let segments: Vec<&str> = module.split('.').collect();
    node(atom(IMPORT), Meta::at_line(line), Some(vec![alias(&segments)]))
}

/// Keyword list literal: `[key: value, ...]`.
pub fn keyword(pairs: Vec<(&str, Ast)>) -> Ast {
    list(
        pairs
            .into_iter()
            .map(|(k, v)| tuple(vec![atom(k), v]))
            .collect(),
    )
}

/// `do ... end` block body: `{:__block__, [], exprs}`.
pub fn block(exprs: Vec<Ast>) -> Ast {
    node(atom("__block__"), Meta::default(), Some(exprs))
}

/// `defmodule Name do body end`.
pub fn defmodule(name: &str, line: u32, body: Vec<Ast>) -> Ast {
    let segments: Vec<&str> = name.split('.').collect();
    call(
        "defmodule",
        line,
        vec![alias(&segments), keyword(vec![("do", block(body))])],
    )
}

/// `def name do body end` with no parameters.
pub fn def(name: &str, line: u32, body: Vec<Ast>) -> Ast {
    call(
        "def",
        line,
        vec![call(name, line, vec![]), keyword(vec![("do", block(body))])],
    )
}
