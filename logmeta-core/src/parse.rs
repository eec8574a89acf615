//! Decoding parser output into [`Ast`] trees.
//!
//! The Elixir parser runs outside this crate and writes one JSON document per
//! source file (`lib/app.ex` → `lib/app.ex.ast.json`). The document is the
//! serde encoding of [`Ast`]:
//!
//! ```json
//! {"node": {"form": {"atom": "import"}, "meta": {"line": 2},
//!           "args": [{"node": {"form": {"atom": "__aliases__"}, "args": [{"atom": "Logger"}]}}]}}
//! ```
//!
//! Quoted forms nest several JSON levels per source construct, so the decoder
//! runs without serde_json's recursion limit and grows the stack on demand.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::ast::Ast;
use crate::error::{IoResultExt, LogmetaError, LogmetaResult};

/// Decode an AST document already read into memory.
pub fn parse_ast_str(path: &Path, content: &str) -> LogmetaResult<Ast> {
    let to_error = |e: serde_json::Error| {
        if e.line() == 0 {
            LogmetaError::parse(path, e.to_string())
        } else {
            LogmetaError::parse_at(path, e.to_string(), e.line(), e.column())
        }
    };

    let mut de = serde_json::Deserializer::from_str(content);
    de.disable_recursion_limit();
    let ast = Ast::deserialize(serde_stacker::Deserializer::new(&mut de)).map_err(to_error)?;
    de.end().map_err(to_error)?;
    Ok(ast)
}

/// Read and decode the AST document at `path`.
pub fn load_ast_file(path: &Path) -> LogmetaResult<Ast> {
    let content = fs::read_to_string(path).with_path(path)?;
    parse_ast_str(path, &content)
}
