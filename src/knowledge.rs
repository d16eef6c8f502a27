//! Well-known deprecations with version metadata.
//!
//! The built-in table covers the legacy protobuf runtime
//! (`github.com/golang/protobuf/*`): for each fully-qualified name it records
//! the version the symbol was deprecated in and when (if ever) an alternative
//! became available. The table is read-only at analysis time; a config file
//! may layer extra entries on top via [`KnowledgeTable::insert`].

use std::collections::HashMap;

use phf::{phf_map, phf_set};
use serde::{Deserialize, Serialize};

/// When an alternative to a deprecated symbol became available, which doubles
/// as the suppression policy for version gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    /// Inherently unsafe or broken API, flagged regardless of target version.
    NeverUse,
    /// No replacement; flagged once the target version reaches the
    /// deprecation version.
    UseNoLonger,
    /// A replacement exists since the given version; flagged once the target
    /// version reaches it, even if the formal deprecation came later.
    Since(u32),
}

/// One knowledge-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownDeprecation {
    /// Version the symbol was deprecated in.
    pub since: u32,
    pub alternative: Alternative,
}

/// The legacy protobuf v1 module paths.
pub static PROTO_V1_MODULES: phf::Set<&'static str> = phf_set! {
    "github.com/golang/protobuf/descriptor",
    "github.com/golang/protobuf/jsonpb",
    "github.com/golang/protobuf/proto",
    "github.com/golang/protobuf/ptypes",
    "github.com/golang/protobuf/ptypes/any",
    "github.com/golang/protobuf/ptypes/duration",
    "github.com/golang/protobuf/ptypes/empty",
    "github.com/golang/protobuf/ptypes/struct",
    "github.com/golang/protobuf/ptypes/timestamp",
    "github.com/golang/protobuf/ptypes/wrappers",
};

/// The legacy runtime's core module. Generated bindings may import it without
/// triggering the module-level warning.
pub const PROTO_V1_CORE: &str = "github.com/golang/protobuf/proto";

/// Built-in entries for the legacy runtime's version-gated deprecations.
/// Versions are protobuf-go minor versions.
static WELL_KNOWN: phf::Map<&'static str, KnownDeprecation> = phf_map! {
    "github.com/golang/protobuf/proto.Marshal" =>
        KnownDeprecation { since: 4, alternative: Alternative::Since(4) },
    "github.com/golang/protobuf/proto.Unmarshal" =>
        KnownDeprecation { since: 4, alternative: Alternative::Since(4) },
    "github.com/golang/protobuf/proto.RegisterType" =>
        KnownDeprecation { since: 4, alternative: Alternative::UseNoLonger },
    "github.com/golang/protobuf/proto.RegisterMapType" =>
        KnownDeprecation { since: 4, alternative: Alternative::UseNoLonger },
    "github.com/golang/protobuf/proto.GetStats" =>
        KnownDeprecation { since: 4, alternative: Alternative::NeverUse },
    "github.com/golang/protobuf/ptypes.AnyMessageName" =>
        KnownDeprecation { since: 4, alternative: Alternative::Since(2) },
    "github.com/golang/protobuf/ptypes.TimestampProto" =>
        KnownDeprecation { since: 4, alternative: Alternative::Since(2) },
    "github.com/golang/protobuf/ptypes.DurationProto" =>
        KnownDeprecation { since: 4, alternative: Alternative::Since(2) },
    "github.com/golang/protobuf/descriptor.ForMessage" =>
        KnownDeprecation { since: 4, alternative: Alternative::Since(2) },
};

/// Read-only lookup of well-known deprecations: config-supplied entries
/// layered over the built-in table.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeTable {
    extra: HashMap<String, KnownDeprecation>,
}

impl KnowledgeTable {
    /// Table with only the built-in entries.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Layer an entry over the built-in table. Extras shadow built-ins with
    /// the same name.
    pub fn insert(&mut self, name: &str, entry: KnownDeprecation) {
        self.extra.insert(name.to_string(), entry);
    }

    pub fn get(&self, qualified_name: &str) -> Option<&KnownDeprecation> {
        self.extra
            .get(qualified_name)
            .or_else(|| WELL_KNOWN.get(qualified_name))
    }

    /// Whether `path` is one of the legacy protobuf v1 module paths.
    pub fn is_legacy_module(path: &str) -> bool {
        PROTO_V1_MODULES.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let table = KnowledgeTable::builtin();
        let entry = table
            .get("github.com/golang/protobuf/proto.GetStats")
            .expect("builtin entry");
        assert_eq!(entry.alternative, Alternative::NeverUse);
        assert!(table.get("example.com/fresh.New").is_none());
    }

    #[test]
    fn test_extra_shadows_builtin() {
        let mut table = KnowledgeTable::builtin();
        table.insert(
            "github.com/golang/protobuf/proto.Marshal",
            KnownDeprecation {
                since: 5,
                alternative: Alternative::UseNoLonger,
            },
        );
        let entry = table
            .get("github.com/golang/protobuf/proto.Marshal")
            .unwrap();
        assert_eq!(entry.since, 5);
    }

    #[test]
    fn test_legacy_module_set() {
        assert!(KnowledgeTable::is_legacy_module(PROTO_V1_CORE));
        assert!(KnowledgeTable::is_legacy_module(
            "github.com/golang/protobuf/ptypes/any"
        ));
        assert!(!KnowledgeTable::is_legacy_module(
            "google.golang.org/protobuf/proto"
        ));
    }
}
