//! Mutates a [`Cluster`] in place according to a validated [`Expression`].
//!
//! Assumes `expr` already passed the Validator; this module's only job
//! is id resolution (turning 1-based stripe/node ids into range errors
//! or real storage) and the three map wire forms.

use std::collections::BTreeMap;

use dynamic_config_core::{EngineError, Expression, Operation, Scope};

use crate::topology::{Cluster, Node};

/// Apply `expr` to `cluster`.
#[tracing::instrument(level = "debug", skip(cluster, expr), fields(expr = %expr.to_text()))]
pub fn apply(cluster: &mut Cluster, expr: &Expression) -> Result<(), EngineError> {
    let operation = derive_apply_operation(expr);
    let name = expr.setting().name;

    // Cluster-only settings: stored directly on `Cluster`, never
    // fanned out to nodes.
    match name {
        "cluster-name" => {
            apply_scalar(&mut cluster.name, expr, operation);
            return Ok(());
        }
        "client-reconnect-window" => {
            apply_scalar(&mut cluster.client_reconnect_window, expr, operation);
            return Ok(());
        }
        "client-lease-duration" => {
            apply_scalar(&mut cluster.client_lease_duration, expr, operation);
            return Ok(());
        }
        "failover-priority" => {
            apply_scalar(&mut cluster.failover_priority, expr, operation);
            return Ok(());
        }
        "security-ssl-tls" => {
            apply_scalar(&mut cluster.security_ssl_tls, expr, operation);
            return Ok(());
        }
        "security-whitelist" => {
            apply_scalar(&mut cluster.security_whitelist, expr, operation);
            return Ok(());
        }
        "security-authc" => {
            apply_scalar(&mut cluster.security_authc, expr, operation);
            return Ok(());
        }
        "offheap-resources" => {
            apply_map(&mut cluster.offheap_resources, expr, operation);
            return Ok(());
        }
        // Handled by an external collaborator (license service) or
        // never reaches this point (Validator rejects every operation
        // on node-config-dir).
        "license-file" | "node-config-dir" => return Ok(()),
        _ => {}
    }

    // Everything else is stored per node: a cluster- or stripe-scoped
    // write fans out to every node in scope.
    for node in target_nodes_mut(cluster, expr.scope())? {
        apply_node_field(node, name, expr, operation);
    }
    Ok(())
}

fn derive_apply_operation(expr: &Expression) -> Operation {
    match expr.value() {
        None => Operation::Get,
        Some(v) if v.is_empty() => Operation::Unset,
        Some(_) => Operation::Set,
    }
}

fn apply_node_field(node: &mut Node, name: &str, expr: &Expression, operation: Operation) {
    match name {
        "node-hostname" => apply_scalar(&mut node.hostname, expr, operation),
        "node-port" => apply_scalar(&mut node.port, expr, operation),
        "node-name" => apply_scalar(&mut node.name, expr, operation),
        "node-bind-address" => apply_scalar(&mut node.bind_address, expr, operation),
        "node-group-bind-address" => apply_scalar(&mut node.group_bind_address, expr, operation),
        "node-group-port" => apply_scalar(&mut node.group_port, expr, operation),
        "node-log-dir" => apply_scalar(&mut node.log_dir, expr, operation),
        "backup-dir" => apply_scalar(&mut node.backup_dir, expr, operation),
        "metadata-dir" => apply_scalar(&mut node.metadata_dir, expr, operation),
        "security-dir" => apply_scalar(&mut node.security_dir, expr, operation),
        "security-audit-log-dir" => apply_scalar(&mut node.security_audit_log_dir, expr, operation),
        "tc-properties" => apply_map(&mut node.tc_properties, expr, operation),
        "data-dirs" => apply_map(&mut node.data_dirs, expr, operation),
        other => unreachable!("setting '{other}' has no node storage; catalog/applier are out of sync"),
    }
}

fn apply_scalar(field: &mut Option<String>, expr: &Expression, operation: Operation) {
    match operation {
        Operation::Unset => *field = None,
        Operation::Set | Operation::Config => *field = expr.value().map(str::to_string),
        Operation::Get => {}
    }
}

fn apply_map(map: &mut BTreeMap<String, String>, expr: &Expression, operation: Operation) {
    match (expr.key(), operation) {
        (None, Operation::Unset) => map.clear(),
        (None, Operation::Set | Operation::Config) => {
            if let Some(value) = expr.value() {
                *map = parse_whole_map(value);
            }
        }
        (Some(key), Operation::Unset) => {
            map.remove(key);
        }
        (Some(key), Operation::Set | Operation::Config) => {
            if let Some(value) = expr.value() {
                map.insert(key.to_string(), value.to_string());
            }
        }
        (_, Operation::Get) => {}
    }
}

/// Parse a whole-map value like `k1:v1,k2:v2` (no escaping grammar).
fn parse_whole_map(value: &str) -> BTreeMap<String, String> {
    value
        .split(',')
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| entry.split_once(':'))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Resolve `scope` to the set of nodes it addresses, raising a range
/// error when a stripe or node id isn't present in the topology.
fn target_nodes_mut<'a>(cluster: &'a mut Cluster, scope: Scope) -> Result<Vec<&'a mut Node>, EngineError> {
    match scope {
        Scope::Cluster => Ok(cluster.stripes.iter_mut().flat_map(|s| s.nodes.iter_mut()).collect()),
        Scope::Stripe { stripe_id } => {
            let count = cluster.stripes.len();
            let stripe = cluster
                .stripe_mut(stripe_id)
                .ok_or(EngineError::StripeOutOfRange { id: stripe_id, count })?;
            Ok(stripe.nodes.iter_mut().collect())
        }
        Scope::Node { stripe_id, node_id } => {
            let stripe_count = cluster.stripes.len();
            let stripe = cluster
                .stripe_mut(stripe_id)
                .ok_or(EngineError::StripeOutOfRange { id: stripe_id, count: stripe_count })?;
            let node_count = stripe.nodes.len();
            let node = stripe
                .node_mut(node_id)
                .ok_or(EngineError::NodeOutOfRange { stripe_id, id: node_id, count: node_count })?;
            Ok(vec![node])
        }
    }
}
