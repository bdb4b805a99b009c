//! Dynamic Config Engine
//!
//! Owns the in-memory cluster topology and the three passes that act on
//! it once an expression has been parsed and validated: the Matcher, the
//! Duplicate/Compatibility Detector, and the Applier.

pub mod applier;
pub mod duplicate;
pub mod matcher;
pub mod topology;

pub use applier::apply;
pub use duplicate::{relation, Relation};
pub use matcher::matches;
pub use topology::{Cluster, Node, Stripe};
