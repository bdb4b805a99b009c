//! Flags when two expressions target the same configuration point, and
//! rejects the cases where they do so in mutually unreadable ways.

use dynamic_config_core::{EngineError, Expression};

/// How two expressions over the same setting and scope relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Both target exactly the same configuration point.
    Duplicate,
    /// They target different configuration points and can coexist.
    Independent,
}

/// Compare `a` and `b`.
///
/// Different settings, or the same setting at different scopes, are
/// always [`Relation::Independent`]. For a scalar setting at the same
/// scope, any two expressions are a [`Relation::Duplicate`] (there is
/// only one configuration point to target). For a map setting, matching
/// sub-keys (or both omitting the key) are a duplicate, differing
/// sub-keys are independent, and a whole-map form paired with a
/// per-entry form at the same scope is rejected outright: neither side
/// can tell whether the other's entries overlap.
pub fn relation(a: &Expression, b: &Expression) -> Result<Relation, EngineError> {
    if a.setting().name != b.setting().name || a.scope() != b.scope() {
        return Ok(Relation::Independent);
    }

    if !a.setting().is_map {
        return Ok(Relation::Duplicate);
    }

    match (a.key(), b.key()) {
        (None, None) => Ok(Relation::Duplicate),
        (Some(ka), Some(kb)) if ka == kb => Ok(Relation::Duplicate),
        (Some(_), Some(_)) => Ok(Relation::Independent),
        _ => Err(EngineError::Incompatible { a: a.to_text(), b: b.to_text() }),
    }
}
