//! Dynamic Config Parser
//!
//! Lexes a raw configuration expression string into a
//! `dynamic_config_core::Expression`, eagerly validating it against
//! the setting catalog along the way.

pub mod parser;

pub use parser::parse;
