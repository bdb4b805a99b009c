//! Rejects illegal (scope × operation × value-presence) combinations
//! with the canonical error messages from the external contract.

use crate::catalog::SpecialPolicy;
use crate::error::EngineError;
use crate::expression::Expression;
use crate::scope::Operation;

/// Validate `expr` against the intended `operation`.
///
/// Every error is prefixed `Invalid input: '<raw>'. Reason: ` where
/// `raw` is the expression's own canonical text (the parser passes the
/// exact text the caller supplied, post-separator-normalization, which
/// for an already-built `Expression` is the same string).
pub fn validate(expr: &Expression, operation: Operation) -> Result<(), EngineError> {
    let raw = expr.to_text();
    let setting = expr.setting();
    let kind = expr.scope().kind();

    // 1. Value-shape rules, independent of scope.
    match operation {
        Operation::Get | Operation::Unset => {
            if matches!(expr.value(), Some(v) if !v.is_empty()) {
                return Err(EngineError::invalid_with_reason(
                    raw,
                    format!("Operation {operation} must not have a value"),
                ));
            }
        }
        Operation::Set | Operation::Config => {
            if expr.value().is_none() {
                return Err(EngineError::invalid_with_reason(
                    raw,
                    format!("Operation {operation} requires a value"),
                ));
            }
        }
    }

    // 2. Scope × operation rules from the catalog.
    if !setting.allows_any(kind) {
        return Err(EngineError::invalid_with_reason(
            raw,
            format!("{} does not allow any operation at {kind} level", setting.name),
        ));
    }

    if !setting.allows(kind, operation) {
        let reason = match (setting.special, operation) {
            (SpecialPolicy::NodeIdentity, Operation::Set | Operation::Config) => {
                format!("{} cannot be set at {kind} level", setting.name)
            }
            (SpecialPolicy::SetOnly, Operation::Get | Operation::Unset) => {
                format!("{} cannot be read or cleared", setting.name)
            }
            _ => format!("{} does not allow operation {operation} at {kind} level", setting.name),
        };
        return Err(EngineError::invalid_with_reason(raw, reason));
    }

    // 3. Empty-value rules, catalog-driven per setting.
    if operation == Operation::Set
        && matches!(expr.value(), Some(v) if v.is_empty())
        && setting.requires_value
    {
        return Err(EngineError::invalid_with_reason(
            raw,
            format!("{} requires a value", setting.name),
        ));
    }

    tracing::trace!(%raw, %operation, "validated");
    Ok(())
}

/// Derive the operation the Parser should validate eagerly from
/// whether `expr` carries a value: absent yields Get, non-empty yields
/// Set, and empty after `=` yields Unset if the setting allows it at
/// this scope (otherwise it stays Set, so the "requires a value"
/// message fires instead).
pub fn derive_operation(expr: &Expression) -> Operation {
    match expr.value() {
        None => Operation::Get,
        Some(v) if v.is_empty() => {
            if expr.setting().allows_unset(expr.scope().kind()) {
                Operation::Unset
            } else {
                Operation::Set
            }
        }
        Some(_) => Operation::Set,
    }
}
