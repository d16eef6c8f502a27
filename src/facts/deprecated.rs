//! Deprecation fact extraction.
//!
//! Mines documentation comments for the `Deprecated: ` marker and binds the
//! message to the declared symbols (and to the module itself when the marker
//! sits in a file's leading documentation). A single pass over declaration
//! headers only; function bodies, statements, and expressions are never
//! entered. Extraction emits no diagnostics and cannot fail — a missing
//! marker simply yields no fact.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::syntax::{
    Decl, FieldDecl, GroupDecl, Ident, ModuleId, ModuleUnit, Spec, Symbol, TypeExpr, Workspace,
};

/// The doc-comment marker, including its single trailing space.
const MARKER: &str = "Deprecated: ";

/// A deprecation message bound to one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecationFact {
    pub message: String,
}

impl std::fmt::Display for DeprecationFact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Deprecated: {}", self.message)
    }
}

/// A deprecation message bound to a whole module, derived from the module's
/// own leading file documentation rather than its declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDeprecationFact {
    pub message: String,
}

/// Facts extracted from one module's compilation-unit group. Immutable once
/// published; merging is a simple union because module boundaries guarantee
/// disjoint keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactSet {
    pub objects: HashMap<Symbol, DeprecationFact>,
    pub modules: HashMap<ModuleId, ModuleDeprecationFact>,
}

impl FactSet {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.modules.is_empty()
    }

    pub fn object(&self, sym: Symbol) -> Option<&DeprecationFact> {
        self.objects.get(&sym)
    }

    pub fn module(&self, module: ModuleId) -> Option<&ModuleDeprecationFact> {
        self.modules.get(&module)
    }

    /// Union another module's facts into this set.
    pub fn merge(&mut self, other: &FactSet) {
        self.objects
            .extend(other.objects.iter().map(|(k, v)| (*k, v.clone())));
        self.modules
            .extend(other.modules.iter().map(|(k, v)| (*k, v.clone())));
    }
}

/// Extract the deprecation message from a sequence of doc-comment groups.
///
/// The first group containing a blank-line-separated paragraph that begins
/// with the literal marker wins; embedded newlines in the message collapse
/// to spaces.
fn deprecation_message<'a>(docs: impl IntoIterator<Item = &'a str>) -> Option<String> {
    for doc in docs {
        for part in doc.split("\n\n") {
            if let Some(msg) = part.strip_prefix(MARKER) {
                return Some(msg.replace('\n', " "));
            }
        }
    }
    None
}

/// Run the fact extractor over one module's files.
pub fn extract(ws: &Workspace, unit: &ModuleUnit) -> FactSet {
    let mut facts = FactSet::default();

    // Module-level message comes from the files' leading documentation, in
    // file order.
    let file_docs = unit.files.iter().filter_map(|f| f.doc.as_deref());
    if let Some(msg) = deprecation_message(file_docs) {
        facts
            .modules
            .insert(unit.module, ModuleDeprecationFact { message: msg });
    }

    for file in &unit.files {
        for decl in &file.decls {
            match decl {
                Decl::Func(func) => {
                    bind(&mut facts, std::slice::from_ref(&func.name), [func.doc.as_deref()]);
                }
                Decl::Group(group) => extract_group(&mut facts, group),
            }
        }
    }

    debug!(
        module = ws.module_path(unit.module),
        objects = facts.objects.len(),
        module_fact = facts.modules.contains_key(&unit.module),
        "extracted deprecation facts"
    );
    facts
}

fn extract_group(facts: &mut FactSet, group: &GroupDecl) {
    for spec in &group.specs {
        match spec {
            Spec::Type(ts) => {
                bind(
                    facts,
                    std::slice::from_ref(&ts.name),
                    [group.doc.as_deref(), ts.doc.as_deref()],
                );
                // Struct fields and interface methods are documented in
                // isolation, never inheriting the enclosing type's message.
                match &ts.ty {
                    TypeExpr::Struct { fields } => extract_fields(facts, fields),
                    TypeExpr::Interface { methods } => extract_fields(facts, methods),
                    TypeExpr::Opaque(_) => {}
                }
            }
            Spec::Value(vs) => {
                bind(
                    facts,
                    &vs.names,
                    [group.doc.as_deref(), vs.doc.as_deref()],
                );
            }
        }
    }
}

fn extract_fields(facts: &mut FactSet, fields: &[FieldDecl]) {
    for field in fields {
        bind(facts, &field.names, [field.doc.as_deref()]);
    }
}

/// Bind one extracted message to every name a declaration declares.
fn bind<const N: usize>(facts: &mut FactSet, names: &[Ident], docs: [Option<&str>; N]) {
    let Some(msg) = deprecation_message(docs.into_iter().flatten()) else {
        return;
    };
    for name in names {
        facts
            .objects
            .insert(name.symbol, DeprecationFact { message: msg.clone() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{
        FuncDecl, GroupKind, SourceFile, Span, SymbolKind, TypeSpec, ValueSpec,
    };

    fn ident(ws: &mut Workspace, m: ModuleId, name: &str, kind: SymbolKind) -> Ident {
        let sym = ws.declare(m, name, kind);
        Ident::new(name, sym, Span::new(1, 1))
    }

    fn unit(m: ModuleId, files: Vec<SourceFile>) -> ModuleUnit {
        ModuleUnit { module: m, files }
    }

    fn file(decls: Vec<Decl>) -> SourceFile {
        SourceFile {
            name: "a.go".to_string(),
            doc: None,
            imports: vec![],
            decls,
        }
    }

    #[test]
    fn test_marker_paragraph_boundary() {
        assert_eq!(
            deprecation_message(["Foo does X.\n\nDeprecated: use Bar instead."]),
            Some("use Bar instead.".to_string())
        );
        // No blank-line-separated marker paragraph.
        assert_eq!(
            deprecation_message(["Foo does X.\nDeprecated-ish, see Bar."]),
            None
        );
        // Marker is case-sensitive and requires its trailing space.
        assert_eq!(deprecation_message(["deprecated: use Bar."]), None);
        assert_eq!(deprecation_message(["Deprecated:use Bar."]), None);
    }

    #[test]
    fn test_marker_newlines_collapse() {
        assert_eq!(
            deprecation_message(["Deprecated: use Bar\ninstead of Foo."]),
            Some("use Bar instead of Foo.".to_string())
        );
    }

    #[test]
    fn test_function_fact() {
        let mut ws = Workspace::new();
        let m = ws.add_module("example.com/a");
        let name = ident(&mut ws, m, "Old", SymbolKind::Func);
        let sym = name.symbol;

        let facts = extract(
            &ws,
            &unit(
                m,
                vec![file(vec![Decl::Func(FuncDecl {
                    doc: Some("Old does things.\n\nDeprecated: use New.".to_string()),
                    name,
                    body: vec![],
                })])],
            ),
        );
        assert_eq!(facts.object(sym).unwrap().message, "use New.");
        assert!(facts.modules.is_empty());
    }

    #[test]
    fn test_grouped_values_share_message() {
        let mut ws = Workspace::new();
        let m = ws.add_module("example.com/a");
        let a = ident(&mut ws, m, "A", SymbolKind::Const);
        let b = ident(&mut ws, m, "B", SymbolKind::Const);
        let (sa, sb) = (a.symbol, b.symbol);

        let facts = extract(
            &ws,
            &unit(
                m,
                vec![file(vec![Decl::Group(GroupDecl {
                    kind: GroupKind::Const,
                    doc: None,
                    specs: vec![Spec::Value(ValueSpec {
                        doc: Some("Deprecated: gone in v2.".to_string()),
                        names: vec![a, b],
                        init: vec![],
                    })],
                })])],
            ),
        );
        assert_eq!(facts.object(sa).unwrap().message, "gone in v2.");
        assert_eq!(facts.object(sb).unwrap().message, "gone in v2.");
    }

    #[test]
    fn test_group_doc_applies_to_specs() {
        let mut ws = Workspace::new();
        let m = ws.add_module("example.com/a");
        let a = ident(&mut ws, m, "A", SymbolKind::Var);
        let b = ident(&mut ws, m, "B", SymbolKind::Var);
        let (sa, sb) = (a.symbol, b.symbol);

        let facts = extract(
            &ws,
            &unit(
                m,
                vec![file(vec![Decl::Group(GroupDecl {
                    kind: GroupKind::Var,
                    doc: Some("Deprecated: the whole group is legacy.".to_string()),
                    specs: vec![
                        Spec::Value(ValueSpec {
                            doc: None,
                            names: vec![a],
                            init: vec![],
                        }),
                        Spec::Value(ValueSpec {
                            doc: None,
                            names: vec![b],
                            init: vec![],
                        }),
                    ],
                })])],
            ),
        );
        assert_eq!(facts.object(sa).unwrap().message, "the whole group is legacy.");
        assert_eq!(facts.object(sb).unwrap().message, "the whole group is legacy.");
    }

    #[test]
    fn test_field_isolation() {
        let mut ws = Workspace::new();
        let m = ws.add_module("example.com/a");
        let ty = ident(&mut ws, m, "Message", SymbolKind::Type);
        let field = ident(&mut ws, m, "XXX_unrecognized", SymbolKind::Field);
        let clean = ident(&mut ws, m, "Name", SymbolKind::Field);
        let (sty, sfield, sclean) = (ty.symbol, field.symbol, clean.symbol);

        let facts = extract(
            &ws,
            &unit(
                m,
                vec![file(vec![Decl::Group(GroupDecl {
                    kind: GroupKind::Type,
                    doc: None,
                    specs: vec![Spec::Type(TypeSpec {
                        doc: Some("Message is a message.".to_string()),
                        name: ty,
                        ty: TypeExpr::Struct {
                            fields: vec![
                                FieldDecl {
                                    doc: Some("Deprecated: do not touch.".to_string()),
                                    names: vec![field],
                                },
                                FieldDecl {
                                    doc: None,
                                    names: vec![clean],
                                },
                            ],
                        },
                    })],
                })])],
            ),
        );
        assert_eq!(facts.object(sfield).unwrap().message, "do not touch.");
        assert!(facts.object(sty).is_none());
        assert!(facts.object(sclean).is_none());
    }

    #[test]
    fn test_module_fact_from_any_file() {
        let mut ws = Workspace::new();
        let m = ws.add_module("example.com/legacy");
        let mut plain = file(vec![]);
        plain.doc = Some("Package legacy wraps the old runtime.".to_string());
        let mut marked = file(vec![]);
        marked.name = "doc.go".to_string();
        marked.doc =
            Some("Package legacy wraps the old runtime.\n\nDeprecated: use example.com/fresh.".to_string());

        let facts = extract(&ws, &unit(m, vec![plain, marked]));
        assert_eq!(
            facts.module(m).unwrap().message,
            "use example.com/fresh."
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let mut ws = Workspace::new();
        let m = ws.add_module("example.com/a");
        let name = ident(&mut ws, m, "Old", SymbolKind::Func);
        let u = unit(
            m,
            vec![file(vec![Decl::Func(FuncDecl {
                doc: Some("Deprecated: use New.".to_string()),
                name,
                body: vec![],
            })])],
        );
        assert_eq!(extract(&ws, &u), extract(&ws, &u));
    }
}
