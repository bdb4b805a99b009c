//! The setting catalog: the static table every downstream component
//! consults before an expression reaches the Validator, Matcher,
//! Duplicate Detector, or Applier.
//!
//! The capability matrix is expressed as data (a match-table `lookup`
//! plus per-`Setting` operation sets), not as per-setting branches in
//! the validator, so exhaustiveness over the 23 settings is checkable
//! by reading this file alone.

use crate::scope::{Operation, ScopeKind};
use std::collections::BTreeSet;

/// What a setting's default value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    /// No default.
    None,
    /// A fixed string.
    Static(&'static str),
    /// Generated per call (currently only `node-name`'s `NODE_NAME`).
    Generated,
}

/// Settings whose capability matrix doesn't fit the generic
/// per-scope-operation-set shape get a dedicated message override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialPolicy {
    /// No override; generic per-scope/operation messages apply.
    None,
    /// Readable everywhere, but SET/CONFIG are rejected with
    /// `"<setting> cannot be set at <scope> level"` instead of the
    /// generic "does not allow operation" message.
    NodeIdentity,
    /// GET and UNSET are rejected with
    /// `"<setting> cannot be read or cleared"` instead of the generic
    /// per-scope message (only `license-file`).
    SetOnly,
}

/// An entry in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
    pub name: &'static str,
    cluster_ops: Option<&'static [Operation]>,
    stripe_ops: Option<&'static [Operation]>,
    node_ops: Option<&'static [Operation]>,
    pub is_map: bool,
    /// If `true`, an empty right-hand side under SET is illegal rather
    /// than an implicit UNSET (relevant only when UNSET is not among
    /// this setting's allowed operations at the scope in question).
    pub requires_value: bool,
    pub default: DefaultValue,
    pub special: SpecialPolicy,
}

impl Setting {
    fn ops_for(&self, kind: ScopeKind) -> Option<&'static [Operation]> {
        match kind {
            ScopeKind::Cluster => self.cluster_ops,
            ScopeKind::Stripe => self.stripe_ops,
            ScopeKind::Node => self.node_ops,
        }
    }

    /// Whether `operation` is allowed at `kind` scope for this setting.
    pub fn allows(&self, kind: ScopeKind, operation: Operation) -> bool {
        self.ops_for(kind)
            .map(|ops| ops.contains(&operation))
            .unwrap_or(false)
    }

    /// Whether any operation at all is allowed at `kind` scope.
    pub fn allows_any(&self, kind: ScopeKind) -> bool {
        self.ops_for(kind).map(|ops| !ops.is_empty()).unwrap_or(false)
    }

    /// Whether this setting allows UNSET at `kind` scope.
    pub fn allows_unset(&self, kind: ScopeKind) -> bool {
        self.allows(kind, Operation::Unset)
    }

    /// A fresh textual default for this setting, if it has one. The
    /// `supplier` is only consulted for `DefaultValue::Generated`.
    pub fn default_text(&self, supplier: &dyn NodeIdSupplier) -> Option<String> {
        match self.default {
            DefaultValue::None => None,
            DefaultValue::Static(s) => Some(s.to_string()),
            DefaultValue::Generated => Some(supplier.next_node_name()),
        }
    }
}

/// Injected source of fresh node-name suffixes, so tests can control
/// `node-name`'s default deterministically instead of reaching for a
/// global RNG.
pub trait NodeIdSupplier {
    /// Returns a distinct string of the form `node-<n>`.
    fn next_node_name(&self) -> String;
}

/// Default supplier: draws a random alphanumeric suffix per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNodeIdSupplier;

impl NodeIdSupplier for RandomNodeIdSupplier {
    fn next_node_name(&self) -> String {
        use rand::Rng;
        let suffix: u64 = rand::rng().random();
        format!("node-{suffix:x}")
    }
}

macro_rules! ops {
    () => { &[] as &'static [Operation] };
    ($($op:ident),+ $(,)?) => { &[$(Operation::$op),+] as &'static [Operation] };
}

const GSU: &[Operation] = ops!(Get, Set, Unset);
const GSUC: &[Operation] = ops!(Get, Set, Unset, Config);
const GS: &[Operation] = ops!(Get, Set);
const GSC: &[Operation] = ops!(Get, Set, Config);
const G: &[Operation] = ops!(Get);
const GC: &[Operation] = ops!(Get, Config);

const CATALOG: &[Setting] = &[
    Setting {
        name: "node-hostname",
        cluster_ops: Some(G),
        stripe_ops: Some(G),
        node_ops: Some(GC),
        is_map: false,
        requires_value: true,
        default: DefaultValue::None,
        special: SpecialPolicy::NodeIdentity,
    },
    Setting {
        name: "node-port",
        cluster_ops: Some(G),
        stripe_ops: Some(G),
        node_ops: Some(GC),
        is_map: false,
        requires_value: true,
        default: DefaultValue::None,
        special: SpecialPolicy::NodeIdentity,
    },
    Setting {
        name: "node-name",
        cluster_ops: Some(G),
        stripe_ops: Some(G),
        node_ops: Some(GC),
        is_map: false,
        requires_value: true,
        default: DefaultValue::Generated,
        special: SpecialPolicy::NodeIdentity,
    },
    Setting {
        name: "node-bind-address",
        cluster_ops: Some(GS),
        stripe_ops: Some(GS),
        node_ops: Some(&[Operation::Get, Operation::Set, Operation::Config]),
        is_map: false,
        requires_value: true,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "node-group-bind-address",
        cluster_ops: Some(GS),
        stripe_ops: Some(GS),
        node_ops: Some(&[Operation::Get, Operation::Set, Operation::Config]),
        is_map: false,
        requires_value: true,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "node-group-port",
        cluster_ops: Some(GS),
        stripe_ops: Some(GS),
        node_ops: Some(&[Operation::Get, Operation::Set, Operation::Config]),
        is_map: false,
        requires_value: true,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "node-log-dir",
        cluster_ops: Some(GS),
        stripe_ops: Some(GS),
        node_ops: Some(&[Operation::Get, Operation::Set, Operation::Config]),
        is_map: false,
        requires_value: true,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "backup-dir",
        cluster_ops: Some(GSU),
        stripe_ops: Some(GSU),
        node_ops: Some(GSUC),
        is_map: false,
        requires_value: false,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "metadata-dir",
        cluster_ops: Some(GSU),
        stripe_ops: Some(GSU),
        node_ops: Some(GSUC),
        is_map: false,
        requires_value: false,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "security-dir",
        cluster_ops: Some(GSU),
        stripe_ops: Some(GSU),
        node_ops: Some(GSUC),
        is_map: false,
        requires_value: false,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "security-audit-log-dir",
        cluster_ops: Some(GSU),
        stripe_ops: Some(GSU),
        node_ops: Some(GSUC),
        is_map: false,
        requires_value: false,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "client-reconnect-window",
        cluster_ops: Some(GSC),
        stripe_ops: None,
        node_ops: None,
        is_map: false,
        requires_value: true,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "client-lease-duration",
        cluster_ops: Some(GSC),
        stripe_ops: None,
        node_ops: None,
        is_map: false,
        requires_value: true,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "failover-priority",
        cluster_ops: Some(GSC),
        stripe_ops: None,
        node_ops: None,
        is_map: false,
        requires_value: true,
        default: DefaultValue::Static("availability"),
        special: SpecialPolicy::None,
    },
    Setting {
        name: "security-ssl-tls",
        cluster_ops: Some(GSC),
        stripe_ops: None,
        node_ops: None,
        is_map: false,
        requires_value: true,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "security-whitelist",
        cluster_ops: Some(GSC),
        stripe_ops: None,
        node_ops: None,
        is_map: false,
        requires_value: true,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "cluster-name",
        cluster_ops: Some(GSUC),
        stripe_ops: None,
        node_ops: None,
        is_map: false,
        requires_value: false,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "security-authc",
        cluster_ops: Some(GSUC),
        stripe_ops: None,
        node_ops: None,
        is_map: false,
        requires_value: false,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "node-config-dir",
        cluster_ops: None,
        stripe_ops: None,
        node_ops: None,
        is_map: false,
        requires_value: true,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "license-file",
        cluster_ops: Some(&[Operation::Set]),
        stripe_ops: None,
        node_ops: None,
        is_map: false,
        requires_value: true,
        default: DefaultValue::None,
        special: SpecialPolicy::SetOnly,
    },
    Setting {
        name: "tc-properties",
        cluster_ops: Some(GSU),
        stripe_ops: Some(GSU),
        node_ops: Some(GSUC),
        is_map: true,
        requires_value: false,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "data-dirs",
        cluster_ops: Some(GSU),
        stripe_ops: Some(GSU),
        node_ops: Some(GSUC),
        is_map: true,
        requires_value: false,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
    Setting {
        name: "offheap-resources",
        cluster_ops: Some(GSUC),
        stripe_ops: None,
        node_ops: None,
        is_map: true,
        requires_value: false,
        default: DefaultValue::None,
        special: SpecialPolicy::None,
    },
];

/// Look up a setting by its canonical name.
///
/// On failure, returns the bare reason string (`"Invalid setting name:
/// '<name>'"`); callers that have the original raw expression text
/// wrap it into an [`EngineError::InvalidInput`].
pub fn lookup(name: &str) -> Result<&'static Setting, String> {
    CATALOG
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| format!("Invalid setting name: '{name}'"))
}

/// All settings, for exhaustive table-driven tests.
pub fn all() -> &'static [Setting] {
    CATALOG
}

/// Every distinct setting name, for quick membership checks.
pub fn names() -> BTreeSet<&'static str> {
    CATALOG.iter().map(|s| s.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_setting() {
        let s = lookup("backup-dir").unwrap();
        assert_eq!(s.name, "backup-dir");
        assert!(s.allows(ScopeKind::Node, Operation::Config));
    }

    #[test]
    fn lookup_unknown_setting_reason() {
        let err = lookup("not-a-real-setting").unwrap_err();
        assert_eq!(err, "Invalid setting name: 'not-a-real-setting'");
    }

    #[test]
    fn node_config_dir_allows_nothing_anywhere() {
        let s = lookup("node-config-dir").unwrap();
        for kind in [ScopeKind::Cluster, ScopeKind::Stripe, ScopeKind::Node] {
            assert!(!s.allows_any(kind));
        }
    }

    #[test]
    fn license_file_is_set_only_at_cluster() {
        let s = lookup("license-file").unwrap();
        assert!(s.allows(ScopeKind::Cluster, Operation::Set));
        assert!(!s.allows(ScopeKind::Cluster, Operation::Get));
        assert!(!s.allows(ScopeKind::Cluster, Operation::Unset));
        assert!(!s.allows_any(ScopeKind::Stripe));
        assert!(!s.allows_any(ScopeKind::Node));
    }

    #[test]
    fn offheap_resources_is_map_cluster_only() {
        let s = lookup("offheap-resources").unwrap();
        assert!(s.is_map);
        assert!(s.allows(ScopeKind::Cluster, Operation::Config));
        assert!(!s.allows_any(ScopeKind::Stripe));
        assert!(!s.allows_any(ScopeKind::Node));
    }

    #[test]
    fn catalog_has_twenty_three_settings() {
        assert_eq!(all().len(), 23);
    }

    #[test]
    fn default_node_name_starts_with_node_dash() {
        let s = lookup("node-name").unwrap();
        let supplier = RandomNodeIdSupplier;
        let text = s.default_text(&supplier).unwrap();
        assert!(text.starts_with("node-"));
    }

    #[test]
    fn default_node_name_is_distinct_per_call() {
        let s = lookup("node-name").unwrap();
        let supplier = RandomNodeIdSupplier;
        let a = s.default_text(&supplier).unwrap();
        let b = s.default_text(&supplier).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn failover_priority_default_is_static() {
        let s = lookup("failover-priority").unwrap();
        let supplier = RandomNodeIdSupplier;
        assert_eq!(s.default_text(&supplier).as_deref(), Some("availability"));
    }
}
