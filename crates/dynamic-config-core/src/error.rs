//! The closed error type for the configuration engine.
//!
//! Every variant's [`Display`] impl is part of the external contract:
//! tests and operator tooling pattern-match these strings verbatim, so
//! the formatting lives in exactly one place.

use std::fmt;

/// All ways an expression, a pair of expressions, or an apply attempt
/// can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Structural, unknown-setting, shape/capability, and value-presence
    /// failures. `reason` is `None` for the two bare structural cases
    /// (non-numeric id, negative id); every other case carries a reason.
    InvalidInput { raw: String, reason: Option<String> },

    /// Stripe id not present in the topology.
    StripeOutOfRange { id: u32, count: usize },

    /// Node id not present in the given stripe.
    NodeOutOfRange { stripe_id: u32, id: u32, count: usize },

    /// Two expressions over the same setting, scope, and key, but one
    /// is the whole-map form and the other the per-entry form.
    Incompatible { a: String, b: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { raw, reason: Some(reason) } => {
                write!(f, "Invalid input: '{raw}'. Reason: {reason}")
            }
            Self::InvalidInput { raw, reason: None } => {
                write!(f, "Invalid input: '{raw}'")
            }
            Self::StripeOutOfRange { id, count } => {
                write!(f, "Invalid stripe ID: {id}. Cluster contains: {count} stripe(s)")
            }
            Self::NodeOutOfRange { stripe_id, id, count } => {
                write!(f, "Invalid node ID: {id}. Stripe ID: {stripe_id} contains: {count} node(s)")
            }
            Self::Incompatible { a, b } => {
                write!(f, "Incompatible or duplicate configurations: {a} and {b}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

impl EngineError {
    pub fn bare_invalid(raw: impl Into<String>) -> Self {
        Self::InvalidInput { raw: raw.into(), reason: None }
    }

    pub fn invalid_with_reason(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput { raw: raw.into(), reason: Some(reason.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invalid_has_no_reason_suffix() {
        let e = EngineError::bare_invalid("stripe.-1.backup-dir");
        assert_eq!(e.to_string(), "Invalid input: 'stripe.-1.backup-dir'");
    }

    #[test]
    fn invalid_with_reason_appends_reason() {
        let e = EngineError::invalid_with_reason(
            "stripe.0.backup-dir",
            "Expected stripe ID to be greater than 0",
        );
        assert_eq!(
            e.to_string(),
            "Invalid input: 'stripe.0.backup-dir'. Reason: Expected stripe ID to be greater than 0"
        );
    }

    #[test]
    fn stripe_out_of_range_message() {
        let e = EngineError::StripeOutOfRange { id: 2, count: 1 };
        assert_eq!(e.to_string(), "Invalid stripe ID: 2. Cluster contains: 1 stripe(s)");
    }

    #[test]
    fn node_out_of_range_message() {
        let e = EngineError::NodeOutOfRange { stripe_id: 1, id: 3, count: 2 };
        assert_eq!(e.to_string(), "Invalid node ID: 3. Stripe ID: 1 contains: 2 node(s)");
    }

    #[test]
    fn incompatible_message() {
        let e = EngineError::Incompatible {
            a: "offheap-resources.main=1GB".into(),
            b: "offheap-resources=main:1GB".into(),
        };
        assert_eq!(
            e.to_string(),
            "Incompatible or duplicate configurations: offheap-resources.main=1GB and offheap-resources=main:1GB"
        );
    }
}
