//! Decides whether a user-supplied expression selects a stored
//! property-key expression.

use dynamic_config_core::Expression;

/// `true` when `user` selects `stored`.
///
/// - The setting must be identical.
/// - `user`'s scope must contain `stored`'s scope (cluster selects
///   anything; stripe selects itself and its nodes; node selects only
///   itself).
/// - For map settings, sub-keys must be compatible (see
///   [`map_key_compatible`]).
/// - Values are ignored entirely.
pub fn matches(user: &Expression, stored: &Expression) -> bool {
    if user.setting().name != stored.setting().name {
        return false;
    }
    if !user.scope().contains(&stored.scope()) {
        return false;
    }
    if user.setting().is_map {
        map_key_compatible(stored.key(), user.key())
    } else {
        true
    }
}

/// Stored side with a key accepts a user query for the same key, or no
/// key at all (a whole-map query subsumes any single entry). Stored
/// side with no key (whole-map form) only accepts a user query with no
/// key.
fn map_key_compatible(stored_key: Option<&str>, user_key: Option<&str>) -> bool {
    match stored_key {
        Some(sk) => user_key.map(|uk| uk == sk).unwrap_or(true),
        None => user_key.is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamic_config_parser::parse;

    #[test]
    fn scenario_whole_map_query_matches_per_node_stored_whole_map() {
        let user = parse("data-dirs").unwrap();
        let stored = parse("stripe.1.node.1.data-dirs=main:foo/bar,second:foo/baz").unwrap();
        assert!(matches(&user, &stored));
    }

    #[test]
    fn scenario_keyed_query_does_not_match_whole_map_stored() {
        let user = parse("data-dirs.main").unwrap();
        let stored = parse("stripe.1.node.1.data-dirs=main:foo/bar,second:foo/baz").unwrap();
        assert!(!matches(&user, &stored));
    }

    #[test]
    fn whole_map_query_matches_keyed_stored_entry() {
        let user = parse("tc-properties").unwrap();
        let stored = parse("tc-properties.some-key=value").unwrap();
        assert!(matches(&user, &stored));
    }

    #[test]
    fn keyed_query_matches_same_key_stored_entry() {
        let user = parse("tc-properties.some-key").unwrap();
        let stored = parse("tc-properties.some-key=value").unwrap();
        assert!(matches(&user, &stored));
    }

    #[test]
    fn keyed_query_does_not_match_different_key() {
        let user = parse("tc-properties.key-a").unwrap();
        let stored = parse("tc-properties.key-b=value").unwrap();
        assert!(!matches(&user, &stored));
    }

    #[test]
    fn cluster_scope_selects_node_scope() {
        let user = parse("backup-dir").unwrap();
        let stored = parse("stripe.1.node.1.backup-dir=/data").unwrap();
        assert!(matches(&user, &stored));
    }

    #[test]
    fn stripe_scope_selects_matching_node_only() {
        let user = parse("stripe.1.backup-dir").unwrap();
        let matching = parse("stripe.1.node.2.backup-dir=/data").unwrap();
        let other_stripe = parse("stripe.2.node.1.backup-dir=/data").unwrap();
        assert!(matches(&user, &matching));
        assert!(!matches(&user, &other_stripe));
    }

    #[test]
    fn node_scope_does_not_select_broader_stripe_entry() {
        let user = parse("stripe.1.node.1.backup-dir").unwrap();
        let stored = parse("stripe.1.backup-dir=/data").unwrap();
        assert!(!matches(&user, &stored));
    }

    #[test]
    fn different_setting_never_matches() {
        let user = parse("backup-dir").unwrap();
        let stored = parse("metadata-dir=/meta").unwrap();
        assert!(!matches(&user, &stored));
    }

    // If a broad query matches a stored entry, any query at a scope
    // between the broad one and the stored entry's scope matches too.
    #[test]
    fn prefix_law_holds_between_cluster_and_node() {
        let cluster_query = parse("backup-dir").unwrap();
        let stripe_query = parse("stripe.1.backup-dir").unwrap();
        let stored = parse("stripe.1.node.3.backup-dir=/data").unwrap();
        assert!(matches(&cluster_query, &stored));
        assert!(matches(&stripe_query, &stored));
    }
}
