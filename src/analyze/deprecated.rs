//! Deprecated-usage analysis.
//!
//! Walks every member-access expression and every import of a module's own
//! files against the merged fact set of its dependency closure. Reportability
//! is decided in a fixed order: universe and own-module references are
//! skipped, the knowledge table applies its version gating, a deprecated
//! enclosing function exempts its own body, and whatever survives is emitted
//! with one of the four wordings in [`super::messages`].

use tracing::trace;

use crate::analyze::messages;
use crate::analyze::AnalysisError;
use crate::diagnostics::Diagnostic;
use crate::facts::FactSet;
use crate::knowledge::{Alternative, KnowledgeTable, PROTO_V1_CORE};
use crate::syntax::{
    Decl, Expr, GeneratedFiles, Generator, ImportDecl, MemberAccess, ModuleId, ModuleUnit,
    SourceFile, Spec, Symbol, Workspace,
};

/// The deprecation usage analyzer for one module.
///
/// Holds only borrowed, immutable inputs; a single `UsageAnalyzer` can run
/// over any number of units sequentially and is deterministic.
pub struct UsageAnalyzer<'a> {
    ws: &'a Workspace,
    facts: &'a FactSet,
    knowledge: &'a KnowledgeTable,
    target_version: u32,
    generated: &'a GeneratedFiles,
}

impl<'a> UsageAnalyzer<'a> {
    pub fn new(
        ws: &'a Workspace,
        facts: &'a FactSet,
        knowledge: &'a KnowledgeTable,
        target_version: u32,
        generated: &'a GeneratedFiles,
    ) -> Self {
        Self {
            ws,
            facts,
            knowledge,
            target_version,
            generated,
        }
    }

    /// Enumerate all reportable deprecated use-sites in the module's files.
    ///
    /// A failed unit returns `Err` with no partial diagnostics.
    pub fn run(&self, unit: &ModuleUnit) -> Result<Vec<Diagnostic>, AnalysisError> {
        let mut diags = Vec::new();
        for file in &unit.files {
            for imp in &file.imports {
                self.check_import(file, imp, &mut diags)?;
            }
            for decl in &file.decls {
                self.check_decl(unit.module, file, decl, &mut diags)?;
            }
        }
        trace!(
            module = self.ws.module_path(unit.module),
            reported = diags.len(),
            "deprecated-usage analysis finished"
        );
        Ok(diags)
    }

    fn check_decl(
        &self,
        module: ModuleId,
        file: &SourceFile,
        decl: &Decl,
        out: &mut Vec<Diagnostic>,
    ) -> Result<(), AnalysisError> {
        match decl {
            Decl::Func(func) => {
                // The function's own symbol is the innermost enclosing
                // function for everything in its body.
                for expr in &func.body {
                    self.check_expr(module, file, expr, Some(func.name.symbol), out)?;
                }
            }
            Decl::Group(group) => {
                for spec in &group.specs {
                    if let Spec::Value(vs) = spec {
                        // Package-level initializers have no enclosing
                        // function declaration.
                        for expr in &vs.init {
                            self.check_expr(module, file, expr, None, out)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn check_expr(
        &self,
        module: ModuleId,
        file: &SourceFile,
        expr: &Expr,
        enclosing: Option<Symbol>,
        out: &mut Vec<Diagnostic>,
    ) -> Result<(), AnalysisError> {
        match expr {
            Expr::Name(_) | Expr::Lit { .. } => Ok(()),
            Expr::Call { callee, args, .. } => {
                self.check_expr(module, file, callee, enclosing, out)?;
                for arg in args {
                    self.check_expr(module, file, arg, enclosing, out)?;
                }
                Ok(())
            }
            Expr::Member(access) => {
                self.check_expr(module, file, &access.receiver, enclosing, out)?;
                self.check_member(module, file, access, enclosing, out)
            }
        }
    }

    fn check_member(
        &self,
        module: ModuleId,
        file: &SourceFile,
        access: &MemberAccess,
        enclosing: Option<Symbol>,
        out: &mut Vec<Diagnostic>,
    ) -> Result<(), AnalysisError> {
        let obj = access.target();
        let Some(obj_module) = self.ws.symbol_module(obj) else {
            // Universe symbols are never reportable.
            return Ok(());
        };
        if obj_module == module || self.ws.is_test_augmentation(module, obj_module) {
            // A module never flags its own deprecated symbols, including
            // from its test augmentation.
            return Ok(());
        }
        let Some(fact) = self.facts.object(obj) else {
            return Ok(());
        };

        let qualified = access
            .qualified_name(self.ws)
            .ok_or_else(|| AnalysisError::UnresolvedAccess(access.render()))?;
        let known = self.knowledge.get(&qualified);
        if let Some(k) = known {
            match k.alternative {
                // Inherently unsafe APIs get no grace period.
                Alternative::NeverUse => {}
                Alternative::UseNoLonger => {
                    if self.target_version < k.since {
                        return Ok(());
                    }
                }
                // Gate on when the alternative appeared, not on when the
                // formal deprecation happened: using the replacement is
                // worthwhile as soon as it exists.
                Alternative::Since(v) => {
                    if self.target_version < v {
                        return Ok(());
                    }
                }
            }
        }

        if let Some(tfn) = enclosing {
            if self.facts.object(tfn).is_some() {
                // Deprecated functions may use deprecated symbols.
                return Ok(());
            }
        }

        let wording = messages::select(&access.render(), &fact.message, known);
        out.push(Diagnostic::new(&file.name, access.span, wording.to_string()));
        Ok(())
    }

    fn check_import(
        &self,
        file: &SourceFile,
        imp: &ImportDecl,
        out: &mut Vec<Diagnostic>,
    ) -> Result<(), AnalysisError> {
        let path = imp
            .unquoted_path()
            .ok_or_else(|| AnalysisError::MalformedImportPath(imp.path_lit.clone()))?;
        let Some(fact) = self.facts.module(imp.module) else {
            return Ok(());
        };
        if path == PROTO_V1_CORE {
            // Generated bindings migrate off the legacy runtime as a unit,
            // not file-by-file.
            if self.generated.get(&file.name) == Some(&Generator::ProtocGenGo) {
                return Ok(());
            }
        }
        out.push(Diagnostic::new(
            &file.name,
            imp.span,
            messages::module_import(path, &fact.message),
        ));
        Ok(())
    }
}
