//! Usage analysis passes that consume published facts.

mod deprecated;
mod messages;

pub use deprecated::UsageAnalyzer;

use thiserror::Error;

/// Fatal conditions for one unit's analysis. Missing optional data (no fact,
/// no knowledge-table entry, no generator classification, no enclosing
/// function) is never an error; a wrong diagnostic is worse than none, so
/// broken input aborts the unit instead.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("malformed import path literal {0}")]
    MalformedImportPath(String),
    #[error("member access cannot be qualified: {0}")]
    UnresolvedAccess(String),
    #[error("facts for module {0} were not published before usage analysis")]
    FactsNotPublished(String),
}
