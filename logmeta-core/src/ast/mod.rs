//! Elixir quoted-form AST model.
//!
//! The tree mirrors what `Code.string_to_quoted/2` produces:
//! - literals (atoms, numbers, strings) stand for themselves
//! - lists and tuples hold ordered children
//! - everything else is a three-element node `{form, meta, args}`
//!
//! The parser itself is external. Trees arrive as JSON in serde's externally
//! tagged encoding (see [`crate::parse`]), or are built in code with [`build`].
//!
//! ```text
//! Logger.error("x", code: 1)
//!
//! Node {
//!     form: Node { form: Atom("."), args: [Node { form: Atom("__aliases__"), args: [Atom("Logger")] }, Atom("error")] },
//!     args: [String("x"), List([Tuple([Atom("code"), Integer(1)])])],
//! }
//! ```

pub mod build;

use serde::{Deserialize, Serialize};

/// Special form that builds a remote callee (`Module.fun`).
pub const DOT: &str = ".";
/// Special form that holds an alias such as `Logger` or `Foo.Bar`.
pub const ALIASES: &str = "__aliases__";
/// Special form for `import Module`.
pub const IMPORT: &str = "import";

/// Positional metadata attached to a node by the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl Meta {
    /// Metadata carrying only a line number.
    pub fn at_line(line: u32) -> Self {
        Self {
            line: Some(line),
            column: None,
        }
    }
}

/// A `{form, meta, args}` node.
///
/// `args` is `None` for variable references (`{:name, meta, nil}` in Elixir)
/// and `Some` for calls and special forms, even when the list is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub form: Box<Ast>,
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub args: Option<Vec<Ast>>,
}

/// One syntactic construct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ast {
    Atom(String),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Ast>),
    Tuple(Vec<Ast>),
    Node(Node),
}

impl Ast {
    /// The atom name, if this is an atom literal.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Ast::Atom(name) => Some(name),
            _ => None,
        }
    }

    /// The node payload, if this is a `{form, meta, args}` node.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Ast::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Line number of this node, if the parser attached one.
    ///
    /// Literals carry no metadata and always return `None`.
    pub fn line(&self) -> Option<u32> {
        self.as_node().and_then(|n| n.meta.line)
    }
}

impl Node {
    /// The form atom for local calls and special forms (`error`, `import`, `.`).
    pub fn form_atom(&self) -> Option<&str> {
        self.form.as_atom()
    }

    /// Argument list, `None` for variable references.
    pub fn args(&self) -> Option<&[Ast]> {
        self.args.as_deref()
    }

    /// Segments of an `__aliases__` node, e.g. `["Foo", "Bar"]` for `Foo.Bar`.
    ///
    /// Returns `None` if this is not an alias or any segment is not an atom.
    pub fn alias_segments(&self) -> Option<Vec<&str>> {
        if self.form_atom() != Some(ALIASES) {
            return None;
        }
        self.args()?.iter().map(Ast::as_atom).collect()
    }
}
