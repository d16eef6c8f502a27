//! Protoshift - deprecation analyzer for migrating off the legacy protobuf
//! runtime.
//!
//! Protoshift takes a fully-resolved syntax representation of a codebase and
//! answers two questions: which declared symbols and modules are marked
//! deprecated by their documentation, and which use-sites of those symbols
//! should be reported, given a target version and a table of well-known
//! version-gated deprecations.
//!
//! # Architecture
//!
//! Two passes, consumed in dependency order:
//!
//! - `facts`: the fact extractor mines `Deprecated:` doc-comment markers and
//!   binds them to symbols and modules (one immutable `FactSet` per module)
//! - `analyze`: the usage analyzer walks member accesses and imports against
//!   the merged fact sets, applying version gating, the self-use exemption,
//!   and the generated-bindings exemption
//!
//! Supporting modules:
//!
//! - `syntax`: the resolved syntax/symbol model handed over by the front-end
//! - `knowledge`: read-only table of well-known legacy-protobuf deprecations
//! - `config`: YAML analysis configuration (target version, generated files)
//! - `runner`: driver-facing orchestration (publish facts, then analyze)
//! - `diagnostics`: the `{position, message}` results stream

pub mod analyze;
pub mod config;
pub mod diagnostics;
pub mod facts;
pub mod knowledge;
pub mod runner;
pub mod syntax;

pub use analyze::{AnalysisError, UsageAnalyzer};
pub use config::{AnalysisConfig, TARGET_LATEST};
pub use diagnostics::Diagnostic;
pub use facts::{extract, DeprecationFact, FactSet, ModuleDeprecationFact};
pub use knowledge::{Alternative, KnowledgeTable, KnownDeprecation, PROTO_V1_CORE};
pub use runner::Runner;
pub use syntax::{
    Decl, Expr, GeneratedFiles, Generator, Ident, ImportDecl, MemberAccess, ModuleId, ModuleUnit,
    SourceFile, Span, Symbol, SymbolKind, Workspace,
};
