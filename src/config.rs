//! Analysis configuration.
//!
//! A small YAML file supplied by the driver: the target version the version
//! gating evaluates against, the per-file generator classification, and any
//! extra knowledge-table entries to layer over the built-ins.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::knowledge::{Alternative, KnowledgeTable, KnownDeprecation};
use crate::syntax::{GeneratedFiles, Generator};

/// Target version meaning "latest": every version-gated report is eligible.
pub const TARGET_LATEST: u32 = u32::MAX;

fn default_target_version() -> u32 {
    TARGET_LATEST
}

/// Top-level analysis configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub version: String,
    /// Version gated reports are evaluated against. Defaults to latest.
    #[serde(default = "default_target_version")]
    pub target_version: u32,
    /// File name -> generator name (e.g. `"types.pb.go": protoc-gen-go`).
    #[serde(default)]
    pub generated_files: HashMap<String, String>,
    /// Extra well-known deprecations layered over the built-in table.
    #[serde(default)]
    pub known_deprecations: Vec<KnownEntry>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            version: String::new(),
            target_version: TARGET_LATEST,
            generated_files: HashMap::new(),
            known_deprecations: Vec::new(),
        }
    }
}

/// One configured knowledge-table entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KnownEntry {
    pub name: String,
    pub deprecated_since: u32,
    pub alternative: Alternative,
}

impl AnalysisConfig {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: AnalysisConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// The generator classification map, dropping unrecognized names.
    pub fn generated(&self) -> GeneratedFiles {
        self.generated_files
            .iter()
            .filter_map(|(file, gen)| Generator::parse(gen).map(|g| (file.clone(), g)))
            .collect()
    }

    /// The knowledge table: built-ins plus configured extras.
    pub fn knowledge_table(&self) -> KnowledgeTable {
        let mut table = KnowledgeTable::builtin();
        for entry in &self.known_deprecations {
            table.insert(
                &entry.name,
                KnownDeprecation {
                    since: entry.deprecated_since,
                    alternative: entry.alternative,
                },
            );
        }
        table
    }
}
