//! Diagnostics produced for the driver.

use serde::{Deserialize, Serialize};

use crate::syntax::Span;

/// One reportable deprecated use-site or deprecated import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(file: &str, span: Span, message: String) -> Self {
        Self {
            file: file.to_string(),
            line: span.line,
            column: span.column,
            message,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.file, self.line, self.column, self.message
        )
    }
}

/// Serialize diagnostics for programmatic consumption by the driver.
pub fn to_json(diags: &[Diagnostic]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(diags)?)
}
