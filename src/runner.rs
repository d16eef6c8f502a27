//! Driver-facing orchestration.
//!
//! The external driver walks the module dependency graph in topological
//! order: it publishes each module's facts with [`Runner::publish`], then
//! analyzes a module's own files with [`Runner::analyze`] once the facts of
//! everything it imports are in. Published fact sets are immutable; analysis
//! only reads their union. Nothing here is concurrent — a module's analysis
//! is one atomic, deterministic unit of work.

use std::collections::HashMap;

use tracing::debug;

use crate::analyze::{AnalysisError, UsageAnalyzer};
use crate::config::AnalysisConfig;
use crate::diagnostics::Diagnostic;
use crate::facts::{self, FactSet};
use crate::knowledge::KnowledgeTable;
use crate::syntax::{GeneratedFiles, ModuleId, ModuleUnit, Workspace};

pub struct Runner<'a> {
    ws: &'a Workspace,
    target_version: u32,
    knowledge: KnowledgeTable,
    generated: GeneratedFiles,
    published: HashMap<ModuleId, FactSet>,
}

impl<'a> Runner<'a> {
    pub fn new(ws: &'a Workspace, config: &AnalysisConfig) -> Self {
        Self {
            ws,
            target_version: config.target_version,
            knowledge: config.knowledge_table(),
            generated: config.generated(),
            published: HashMap::new(),
        }
    }

    /// Run the fact extractor over a module and publish the result.
    ///
    /// Publishing is idempotent: facts are computed once per module and
    /// immutable afterward.
    pub fn publish(&mut self, unit: &ModuleUnit) -> &FactSet {
        self.published
            .entry(unit.module)
            .or_insert_with(|| facts::extract(self.ws, unit))
    }

    /// Facts published for a module, if any.
    pub fn facts(&self, module: ModuleId) -> Option<&FactSet> {
        self.published.get(&module)
    }

    /// Run the usage analyzer over a module's own files, against the union
    /// of every published fact set.
    ///
    /// The module's own facts must have been published first; the driver's
    /// topological ordering makes that hold for its imports as well.
    pub fn analyze(&self, unit: &ModuleUnit) -> anyhow::Result<Vec<Diagnostic>> {
        if !self.published.contains_key(&unit.module) {
            return Err(AnalysisError::FactsNotPublished(
                self.ws.module_path(unit.module).to_string(),
            )
            .into());
        }
        let merged = self.merged_facts();
        debug!(
            module = self.ws.module_path(unit.module),
            fact_objects = merged.objects.len(),
            fact_modules = merged.modules.len(),
            "analyzing module against merged facts"
        );
        let analyzer = UsageAnalyzer::new(
            self.ws,
            &merged,
            &self.knowledge,
            self.target_version,
            &self.generated,
        );
        let diags = analyzer.run(unit)?;
        Ok(diags)
    }

    /// Union of all published fact sets. Module boundaries guarantee the
    /// maps are disjoint, so the union order is irrelevant.
    fn merged_facts(&self) -> FactSet {
        let mut merged = FactSet::default();
        for set in self.published.values() {
            merged.merge(set);
        }
        merged
    }
}
