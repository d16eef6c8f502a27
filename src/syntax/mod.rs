//! Resolved syntax model consumed by the analysis passes.
//!
//! This is the interface to the external front-end: a fully-resolved,
//! immutable representation of each module's files — declarations with their
//! doc comments, imports with their resolved modules, and the expressions
//! that reference foreign symbols. The analysis core walks this model; it
//! never parses source text or resolves names itself.

mod symbols;

pub use symbols::{ModuleId, Symbol, SymbolKind, Workspace};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Source position a diagnostic is anchored at (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A resolved identifier occurrence.
#[derive(Debug, Clone)]
pub struct Ident {
    pub name: String,
    pub symbol: Symbol,
    pub span: Span,
}

impl Ident {
    pub fn new(name: &str, symbol: Symbol, span: Span) -> Self {
        Self {
            name: name.to_string(),
            symbol,
            span,
        }
    }
}

/// A top-level declaration in a file.
#[derive(Debug, Clone)]
pub enum Decl {
    Func(FuncDecl),
    Group(GroupDecl),
}

/// A function declaration. The body is opaque to the fact extractor and
/// walked only by the usage analyzer.
#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub doc: Option<String>,
    pub name: Ident,
    pub body: Vec<Expr>,
}

/// Which keyword introduced a group declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Type,
    Const,
    Var,
}

/// A `type`/`const`/`var` declaration, possibly grouping several specs
/// behind one shared doc comment.
#[derive(Debug, Clone)]
pub struct GroupDecl {
    pub kind: GroupKind,
    pub doc: Option<String>,
    pub specs: Vec<Spec>,
}

#[derive(Debug, Clone)]
pub enum Spec {
    Type(TypeSpec),
    Value(ValueSpec),
}

#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub doc: Option<String>,
    pub name: Ident,
    pub ty: TypeExpr,
}

/// A value spec binding one or more names, with optional initializers.
#[derive(Debug, Clone)]
pub struct ValueSpec {
    pub doc: Option<String>,
    pub names: Vec<Ident>,
    pub init: Vec<Expr>,
}

/// The shape of a declared type, as far as the analysis cares: struct and
/// interface bodies carry nested documentation-bearing declarations, and
/// everything else is opaque.
#[derive(Debug, Clone)]
pub enum TypeExpr {
    Struct { fields: Vec<FieldDecl> },
    Interface { methods: Vec<FieldDecl> },
    Opaque(String),
}

/// A struct field or interface method declaration. Embedded fields bind no
/// names.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub doc: Option<String>,
    pub names: Vec<Ident>,
}

/// An expression, reduced to the shapes the usage analyzer distinguishes.
#[derive(Debug, Clone)]
pub enum Expr {
    Name(Ident),
    Lit { value: String, span: Span },
    Call { callee: Box<Expr>, args: Vec<Expr>, span: Span },
    Member(MemberAccess),
}

impl Expr {
    /// Render the expression back to source text for diagnostics.
    pub fn render(&self) -> String {
        match self {
            Expr::Name(id) => id.name.clone(),
            Expr::Lit { value, .. } => value.clone(),
            Expr::Call { callee, args, .. } => {
                let args: Vec<String> = args.iter().map(Expr::render).collect();
                format!("{}({})", callee.render(), args.join(", "))
            }
            Expr::Member(m) => m.render(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Expr::Name(id) => id.span,
            Expr::Lit { span, .. } => *span,
            Expr::Call { span, .. } => *span,
            Expr::Member(m) => m.span,
        }
    }
}

/// A `receiver.member` access whose member resolved to some symbol.
#[derive(Debug, Clone)]
pub struct MemberAccess {
    pub receiver: Box<Expr>,
    /// The selected member; `member.symbol` is the resolved target.
    pub member: Ident,
    /// Receiver type name for method/field selections. `None` when the
    /// receiver is a module qualifier.
    pub recv_type: Option<String>,
    pub span: Span,
}

impl MemberAccess {
    /// The resolved target of the access.
    pub fn target(&self) -> Symbol {
        self.member.symbol
    }

    pub fn render(&self) -> String {
        format!("{}.{}", self.receiver.render(), self.member.name)
    }

    /// Fully-qualified name used for knowledge-table lookups:
    /// `(RecvType).Member` for selections, `module/path.Member` for
    /// module-qualified accesses. `None` when neither qualification exists.
    pub fn qualified_name(&self, ws: &Workspace) -> Option<String> {
        if let Some(recv) = &self.recv_type {
            return Some(format!("({}).{}", recv, self.member.name));
        }
        let module = ws.symbol_module(self.target())?;
        Some(format!("{}.{}", ws.module_path(module), self.member.name))
    }
}

/// An import declaration. The path is kept as the quoted source literal;
/// resolution to a module already happened in the front-end.
#[derive(Debug, Clone)]
pub struct ImportDecl {
    /// Quoted literal as written, e.g. `"\"example.com/legacy\""`.
    pub path_lit: String,
    pub module: ModuleId,
    pub span: Span,
}

impl ImportDecl {
    /// Unquote the path literal. `None` when the literal is malformed,
    /// which the analyzer treats as fatal for the unit.
    pub fn unquoted_path(&self) -> Option<&str> {
        let inner = self.path_lit.strip_prefix('"')?.strip_suffix('"')?;
        if inner.contains('"') || inner.contains('\\') {
            return None;
        }
        Some(inner)
    }
}

/// One compilation unit (file) of a module.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    /// Leading file documentation, already rendered to plain text.
    pub doc: Option<String>,
    pub imports: Vec<ImportDecl>,
    pub decls: Vec<Decl>,
}

/// A module's compilation-unit group: the unit both passes operate on.
#[derive(Debug, Clone)]
pub struct ModuleUnit {
    pub module: ModuleId,
    pub files: Vec<SourceFile>,
}

/// Which code generator produced a file, when one is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Generator {
    ProtocGenGo,
    Goyacc,
    Cgo,
    Stringer,
}

impl Generator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Generator::ProtocGenGo => "protoc-gen-go",
            Generator::Goyacc => "goyacc",
            Generator::Cgo => "cgo",
            Generator::Stringer => "stringer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "protoc-gen-go" => Some(Generator::ProtocGenGo),
            "goyacc" => Some(Generator::Goyacc),
            "cgo" => Some(Generator::Cgo),
            "stringer" => Some(Generator::Stringer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-file generator classification, keyed by file name.
pub type GeneratedFiles = HashMap<String, Generator>;
