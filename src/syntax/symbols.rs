//! Opaque handles for resolved entities, plus the tables that own them.
//!
//! The analysis core never constructs a [`Symbol`] or [`ModuleId`] itself;
//! the front-end resolver hands them out and the core only compares them.
//! [`Workspace`] is the resolver-owned side of that contract: it interns
//! names, kinds, and module paths, and answers lookups by handle.

use serde::{Deserialize, Serialize};

/// Handle to a uniquely-resolved declared entity.
///
/// Identity is the handle value itself: two `Symbol`s compare equal exactly
/// when the resolver issued them for the same declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(u32);

/// Handle to a module (one compilation boundary, possibly many files).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId(u32);

/// What kind of entity a symbol names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Func,
    Type,
    Var,
    Const,
    Field,
    Method,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Func => "func",
            SymbolKind::Type => "type",
            SymbolKind::Var => "var",
            SymbolKind::Const => "const",
            SymbolKind::Field => "field",
            SymbolKind::Method => "method",
        }
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
struct SymbolInfo {
    name: String,
    kind: SymbolKind,
    /// Defining module. `None` for universe (builtin) symbols.
    module: Option<ModuleId>,
}

#[derive(Debug, Clone)]
struct ModuleInfo {
    path: String,
}

/// Resolver-owned symbol and module tables for one analysis run.
///
/// Handles issued by one `Workspace` are only meaningful against that
/// `Workspace`; nothing here persists across runs.
#[derive(Debug, Default)]
pub struct Workspace {
    symbols: Vec<SymbolInfo>,
    modules: Vec<ModuleInfo>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module by import path and return its handle.
    pub fn add_module(&mut self, path: &str) -> ModuleId {
        let id = ModuleId(self.modules.len() as u32);
        self.modules.push(ModuleInfo {
            path: path.to_string(),
        });
        id
    }

    /// Register a declared entity belonging to `module`.
    pub fn declare(&mut self, module: ModuleId, name: &str, kind: SymbolKind) -> Symbol {
        self.intern(SymbolInfo {
            name: name.to_string(),
            kind,
            module: Some(module),
        })
    }

    /// Register a universe-scope entity (builtins such as `print` or `len`).
    pub fn declare_universe(&mut self, name: &str, kind: SymbolKind) -> Symbol {
        self.intern(SymbolInfo {
            name: name.to_string(),
            kind,
            module: None,
        })
    }

    fn intern(&mut self, info: SymbolInfo) -> Symbol {
        let sym = Symbol(self.symbols.len() as u32);
        self.symbols.push(info);
        sym
    }

    pub fn symbol_name(&self, sym: Symbol) -> &str {
        &self.symbols[sym.0 as usize].name
    }

    pub fn symbol_kind(&self, sym: Symbol) -> SymbolKind {
        self.symbols[sym.0 as usize].kind
    }

    /// The module a symbol was declared in; `None` for universe symbols.
    pub fn symbol_module(&self, sym: Symbol) -> Option<ModuleId> {
        self.symbols[sym.0 as usize].module
    }

    pub fn module_path(&self, module: ModuleId) -> &str {
        &self.modules[module.0 as usize].path
    }

    /// Whether `module` is the in-place test augmentation of `of` (the
    /// `foo_test` module compiled alongside `foo`).
    pub fn is_test_augmentation(&self, module: ModuleId, of: ModuleId) -> bool {
        let path = self.module_path(module);
        let base = self.module_path(of);
        path.len() == base.len() + "_test".len()
            && path.starts_with(base)
            && path.ends_with("_test")
    }
}
