//! The cluster topology the Applier mutates.
//!
//! Owned by the host process; this crate only defines its shape and
//! the mutations the Applier performs on it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One server process within a [`Stripe`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub hostname: Option<String>,
    pub port: Option<String>,
    pub name: Option<String>,
    pub bind_address: Option<String>,
    pub group_bind_address: Option<String>,
    pub group_port: Option<String>,
    pub log_dir: Option<String>,
    pub backup_dir: Option<String>,
    pub metadata_dir: Option<String>,
    pub security_dir: Option<String>,
    pub security_audit_log_dir: Option<String>,
    pub tc_properties: BTreeMap<String, String>,
    pub data_dirs: BTreeMap<String, String>,
}

/// An ordered group of [`Node`]s that fail over together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stripe {
    pub nodes: Vec<Node>,
}

/// The whole cluster: an ordered list of stripes plus cluster-wide
/// scalar and map settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub stripes: Vec<Stripe>,
    pub name: Option<String>,
    pub client_reconnect_window: Option<String>,
    pub client_lease_duration: Option<String>,
    pub failover_priority: Option<String>,
    pub security_ssl_tls: Option<String>,
    pub security_whitelist: Option<String>,
    pub security_authc: Option<String>,
    pub offheap_resources: BTreeMap<String, String>,
}

impl Cluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cluster with `stripe_count` stripes, each with `nodes_per_stripe` nodes.
    pub fn with_shape(stripe_count: usize, nodes_per_stripe: usize) -> Self {
        let stripes = (0..stripe_count)
            .map(|_| Stripe { nodes: vec![Node::default(); nodes_per_stripe] })
            .collect();
        Self { stripes, ..Self::default() }
    }

    /// 1-based lookup; returns `None` when the id is out of range.
    pub fn stripe(&self, stripe_id: u32) -> Option<&Stripe> {
        stripe_id.checked_sub(1).and_then(|idx| self.stripes.get(idx as usize))
    }

    pub fn stripe_mut(&mut self, stripe_id: u32) -> Option<&mut Stripe> {
        stripe_id.checked_sub(1).and_then(|idx| self.stripes.get_mut(idx as usize))
    }
}

impl Stripe {
    /// 1-based lookup; returns `None` when the id is out of range.
    pub fn node(&self, node_id: u32) -> Option<&Node> {
        node_id.checked_sub(1).and_then(|idx| self.nodes.get(idx as usize))
    }

    pub fn node_mut(&mut self, node_id: u32) -> Option<&mut Node> {
        node_id.checked_sub(1).and_then(|idx| self.nodes.get_mut(idx as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stripe_lookup_is_one_based() {
        let c = Cluster::with_shape(2, 1);
        assert!(c.stripe(1).is_some());
        assert!(c.stripe(2).is_some());
        assert!(c.stripe(3).is_none());
        assert!(c.stripe(0).is_none());
    }

    #[test]
    fn node_lookup_is_one_based() {
        let c = Cluster::with_shape(1, 2);
        let s = c.stripe(1).unwrap();
        assert!(s.node(1).is_some());
        assert!(s.node(2).is_some());
        assert!(s.node(3).is_none());
    }
}
