//! Diagnostic message shapes.
//!
//! The four wordings a deprecated use-site can be reported with, kept as a
//! closed enum so each literal string lives in exactly one place and can be
//! tested apart from the eligibility logic that selects it.

use std::fmt;

use crate::knowledge::{Alternative, KnownDeprecation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Wording {
    /// Known entry with the never-use policy.
    NeverUse { expr: String, since: u32, msg: String },
    /// Known entry whose alternative arrived with the deprecation itself, or
    /// that simply has no alternative.
    Since { expr: String, since: u32, msg: String },
    /// Known entry whose alternative arrived in a different version.
    Alternative {
        expr: String,
        since: u32,
        available: u32,
        msg: String,
    },
    /// Deprecated by doc comment only, no knowledge-table entry.
    Plain { expr: String, msg: String },
}

/// Pick the wording for a reportable use-site.
pub(crate) fn select(expr: &str, msg: &str, known: Option<&KnownDeprecation>) -> Wording {
    let expr = expr.to_string();
    let msg = msg.to_string();
    match known {
        Some(k) => match k.alternative {
            Alternative::NeverUse => Wording::NeverUse {
                expr,
                since: k.since,
                msg,
            },
            Alternative::UseNoLonger => Wording::Since {
                expr,
                since: k.since,
                msg,
            },
            Alternative::Since(v) if v == k.since => Wording::Since {
                expr,
                since: k.since,
                msg,
            },
            Alternative::Since(v) => Wording::Alternative {
                expr,
                since: k.since,
                available: v,
                msg,
            },
        },
        None => Wording::Plain { expr, msg },
    }
}

impl fmt::Display for Wording {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wording::NeverUse { expr, since, msg } => write!(
                f,
                "{} has been deprecated since version {} because it shouldn't be used: {}",
                expr, since, msg
            ),
            Wording::Since { expr, since, msg } => write!(
                f,
                "{} has been deprecated since version {}: {}",
                expr, since, msg
            ),
            Wording::Alternative {
                expr,
                since,
                available,
                msg,
            } => write!(
                f,
                "{} has been deprecated since version {} and an alternative has been available since version {}: {}",
                expr, since, available, msg
            ),
            Wording::Plain { expr, msg } => write!(f, "{} is deprecated: {}", expr, msg),
        }
    }
}

/// Wording for a deprecated module import.
pub(crate) fn module_import(path: &str, msg: &str) -> String {
    format!("module {} is deprecated: {}", path, msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(since: u32, alternative: Alternative) -> KnownDeprecation {
        KnownDeprecation { since, alternative }
    }

    #[test]
    fn test_never_use_wording() {
        let w = select("proto.GetStats", "no-op in v2.", Some(&known(4, Alternative::NeverUse)));
        assert_eq!(
            w.to_string(),
            "proto.GetStats has been deprecated since version 4 because it shouldn't be used: no-op in v2."
        );
    }

    #[test]
    fn test_since_wording() {
        let w = select("proto.RegisterType", "use protoregistry.", Some(&known(4, Alternative::UseNoLonger)));
        assert_eq!(
            w.to_string(),
            "proto.RegisterType has been deprecated since version 4: use protoregistry."
        );
        // Alternative arriving with the deprecation collapses to the same shape.
        let w = select("proto.Marshal", "use the v2 API.", Some(&known(4, Alternative::Since(4))));
        assert_eq!(
            w.to_string(),
            "proto.Marshal has been deprecated since version 4: use the v2 API."
        );
    }

    #[test]
    fn test_alternative_wording() {
        let w = select("x.Old", "use x.New.", Some(&known(6, Alternative::Since(3))));
        assert_eq!(
            w.to_string(),
            "x.Old has been deprecated since version 6 and an alternative has been available since version 3: use x.New."
        );
    }

    #[test]
    fn test_plain_wording() {
        let w = select("legacy.Thing", "use fresh.Thing.", None);
        assert_eq!(w.to_string(), "legacy.Thing is deprecated: use fresh.Thing.");
    }

    #[test]
    fn test_module_import_wording() {
        assert_eq!(
            module_import("example.com/legacy", "use example.com/fresh."),
            "module example.com/legacy is deprecated: use example.com/fresh."
        );
    }
}
