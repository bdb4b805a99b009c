//! The in-memory representation of one parsed configuration line.

use crate::catalog::{NodeIdSupplier, Setting};
use crate::scope::Scope;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One parsed `(scope, setting, key?, value?)` tuple.
///
/// Immutable once constructed. Equality and hashing are defined over
/// the canonical textual form, so two expressions built differently
/// (e.g. via `:` vs `.` separators) but describing the same thing
/// compare equal.
#[derive(Debug, Clone)]
pub struct Expression {
    setting: &'static Setting,
    scope: Scope,
    key: Option<String>,
    value: Option<String>,
}

impl Expression {
    /// Build an expression directly, bypassing the parser. Used by the
    /// catalog's `value_of` factory and by tests.
    pub fn new(setting: &'static Setting, scope: Scope, key: Option<String>, value: Option<String>) -> Self {
        Self { setting, scope, key, value }
    }

    pub fn setting(&self) -> &'static Setting {
        self.setting
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn stripe_id(&self) -> Option<u32> {
        self.scope.stripe_id()
    }

    pub fn node_id(&self) -> Option<u32> {
        self.scope.node_id()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The canonical textual form, always using `.` as the separator.
    pub fn to_text(&self) -> String {
        let mut out = self.scope.text_prefix();
        out.push_str(self.setting.name);
        if let Some(key) = &self.key {
            out.push('.');
            out.push_str(key);
        }
        if let Some(value) = &self.value {
            out.push('=');
            out.push_str(value);
        }
        out
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.to_text() == other.to_text()
    }
}

impl Eq for Expression {}

impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_text().hash(state);
    }
}

impl Setting {
    /// Factory: build the expression representing this setting's
    /// default value at `scope`, resolving `Generated` defaults
    /// through `supplier` rather than a global RNG.
    pub fn value_of(&'static self, scope: Scope, supplier: &dyn NodeIdSupplier) -> Option<Expression> {
        self.default_text(supplier)
            .map(|text| Expression::new(self, scope, None, Some(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{lookup, RandomNodeIdSupplier};

    #[test]
    fn cluster_scope_text_has_no_prefix() {
        let setting = lookup("cluster-name").unwrap();
        let e = Expression::new(setting, Scope::Cluster, None, Some("prod".into()));
        assert_eq!(e.to_text(), "cluster-name=prod");
    }

    #[test]
    fn stripe_scope_text_has_stripe_prefix() {
        let setting = lookup("backup-dir").unwrap();
        let e = Expression::new(setting, Scope::Stripe { stripe_id: 1 }, None, Some("/data".into()));
        assert_eq!(e.to_text(), "stripe.1.backup-dir=/data");
    }

    #[test]
    fn node_scope_text_has_stripe_and_node_prefix() {
        let setting = lookup("security-dir").unwrap();
        let e = Expression::new(
            setting,
            Scope::Node { stripe_id: 1, node_id: 1 },
            None,
            Some("foo/bar".into()),
        );
        assert_eq!(e.to_text(), "stripe.1.node.1.security-dir=foo/bar");
    }

    #[test]
    fn map_key_renders_between_setting_and_value() {
        let setting = lookup("offheap-resources").unwrap();
        let e = Expression::new(setting, Scope::Cluster, Some("main".into()), Some("1GB".into()));
        assert_eq!(e.to_text(), "offheap-resources.main=1GB");
    }

    #[test]
    fn absent_value_omits_equals_sign() {
        let setting = lookup("backup-dir").unwrap();
        let e = Expression::new(setting, Scope::Cluster, None, None);
        assert_eq!(e.to_text(), "backup-dir");
    }

    #[test]
    fn empty_value_keeps_trailing_equals_sign() {
        let setting = lookup("backup-dir").unwrap();
        let e = Expression::new(setting, Scope::Cluster, None, Some(String::new()));
        assert_eq!(e.to_text(), "backup-dir=");
    }

    #[test]
    fn equality_is_over_textual_form() {
        let setting = lookup("cluster-name").unwrap();
        let a = Expression::new(setting, Scope::Cluster, None, Some("x".into()));
        let b = Expression::new(setting, Scope::Cluster, None, Some("x".into()));
        assert_eq!(a, b);
    }

    #[test]
    fn value_of_generates_distinct_node_names() {
        let setting = lookup("node-name").unwrap();
        let supplier = RandomNodeIdSupplier;
        let e = setting.value_of(Scope::Node { stripe_id: 1, node_id: 1 }, &supplier).unwrap();
        assert!(e.to_text().starts_with("stripe.1.node.1.node-name=node-"));
    }

    #[test]
    fn value_of_is_none_when_setting_has_no_default() {
        let setting = lookup("backup-dir").unwrap();
        let supplier = RandomNodeIdSupplier;
        assert!(setting.value_of(Scope::Cluster, &supplier).is_none());
    }
}
