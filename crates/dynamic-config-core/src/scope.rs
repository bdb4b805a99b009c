//! Scope and operation tags for a configuration expression.

use std::fmt;

/// The intended use of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Read the current value.
    Get,
    /// Write a new value.
    Set,
    /// Clear the value.
    Unset,
    /// Initial bootstrap write, only legal at node scope.
    Config,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Unset => "unset",
            Self::Config => "config",
        };
        write!(f, "{word}")
    }
}

/// The granularity at which a setting is addressed, without its ids.
///
/// Kept separate from [`Scope`] because error messages name the kind
/// of scope ("cluster level") but never the specific ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Cluster,
    Stripe,
    Node,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Self::Cluster => "cluster",
            Self::Stripe => "stripe",
            Self::Node => "node",
        };
        write!(f, "{word}")
    }
}

/// Where in the cluster topology an expression applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Cluster,
    Stripe { stripe_id: u32 },
    Node { stripe_id: u32, node_id: u32 },
}

impl Scope {
    pub fn kind(&self) -> ScopeKind {
        match self {
            Self::Cluster => ScopeKind::Cluster,
            Self::Stripe { .. } => ScopeKind::Stripe,
            Self::Node { .. } => ScopeKind::Node,
        }
    }

    pub fn stripe_id(&self) -> Option<u32> {
        match self {
            Self::Cluster => None,
            Self::Stripe { stripe_id } | Self::Node { stripe_id, .. } => Some(*stripe_id),
        }
    }

    pub fn node_id(&self) -> Option<u32> {
        match self {
            Self::Node { node_id, .. } => Some(*node_id),
            _ => None,
        }
    }

    /// `true` when `self` is the same scope as, or a strict ancestor
    /// of, `other` (cluster contains stripe contains node).
    pub fn contains(&self, other: &Scope) -> bool {
        match (self, other) {
            (Scope::Cluster, _) => true,
            (Scope::Stripe { stripe_id: a }, Scope::Stripe { stripe_id: b }) => a == b,
            (Scope::Stripe { stripe_id: a }, Scope::Node { stripe_id: b, .. }) => a == b,
            (Scope::Node { stripe_id: a, node_id: na }, Scope::Node { stripe_id: b, node_id: nb }) => {
                a == b && na == nb
            }
            _ => false,
        }
    }

    /// Textual prefix for this scope, e.g. `"stripe.1.node.2."`. Empty
    /// for cluster scope.
    pub fn text_prefix(&self) -> String {
        match self {
            Scope::Cluster => String::new(),
            Scope::Stripe { stripe_id } => format!("stripe.{stripe_id}."),
            Scope::Node { stripe_id, node_id } => format!("stripe.{stripe_id}.node.{node_id}."),
        }
    }
}
