use serde::Serialize;

/// Message attached to every finding of this check.
pub const MESSAGE: &str = "Logger metadata will be ignored in production";

/// One offending logging call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: &'static str,
    /// Line of the call, if the parser recorded one
    pub line: Option<u32>,
}

impl Diagnostic {
    pub fn at(line: Option<u32>) -> Self {
        Self {
            message: MESSAGE,
            line,
        }
    }
}
