//! Dynamic Config Core
//!
//! The setting catalog, the expression value object, and the validator
//! that together define what a legal configuration expression is. No
//! parsing lives here (see `dynamic-config-parser`), and no topology
//! mutation (see `dynamic-config-engine`).

pub mod catalog;
pub mod error;
pub mod expression;
pub mod scope;
pub mod validate;

pub use catalog::{lookup, DefaultValue, NodeIdSupplier, RandomNodeIdSupplier, Setting, SpecialPolicy};
pub use error::EngineError;
pub use expression::Expression;
pub use scope::{Operation, Scope, ScopeKind};
pub use validate::{derive_operation, validate};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn core_types_are_send_and_sync() {
        assert_send_sync::<Expression>();
        assert_send_sync::<Scope>();
        assert_send_sync::<Setting>();
        assert_send_sync::<EngineError>();
    }
}
