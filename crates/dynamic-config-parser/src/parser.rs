//! Lexing for the configuration expression grammar.
//!
//! ```text
//! expr        := [ scope_prefix SEP ] setting_ref [ "=" value ]
//! scope_prefix:= "stripe" "." id [ "." "node" "." id ]
//! setting_ref := name [ "." sub_key ]
//! SEP         := "." | ":"
//! id          := positive integer
//! value       := rest-of-string (may be empty)
//! ```
//!
//! `.` and `:` are fully interchangeable segment separators anywhere in
//! the head (the part before the first `=`). The value, once split
//! off, is never re-tokenized, so whole-map values like `k1:v1,k2:v2`
//! pass through untouched.

use dynamic_config_core::{catalog, derive_operation, validate, EngineError, Expression, Scope};

/// Parse a raw expression string, eagerly validating it against the
/// implicit operation its value presence implies.
#[tracing::instrument(level = "debug", skip(raw), fields(raw))]
pub fn parse(raw: &str) -> Result<Expression, EngineError> {
    let (head, value) = match raw.split_once('=') {
        Some((h, v)) => (h, Some(v.to_string())),
        None => (raw, None),
    };

    let tokens: Vec<&str> = if head.is_empty() {
        Vec::new()
    } else {
        head.split(|c| c == '.' || c == ':').collect()
    };

    let (scope, rest) = parse_scope_prefix(&tokens, raw)?;

    if rest.is_empty() || rest[0].is_empty() {
        return Err(EngineError::invalid_with_reason(raw, "valid setting name not found"));
    }

    let setting_name = rest[0];
    let key = if rest.len() > 1 { Some(rest[1..].join(".")) } else { None };

    let setting = catalog::lookup(setting_name).map_err(|reason| EngineError::invalid_with_reason(raw, reason))?;

    if key.is_some() && !setting.is_map {
        return Err(EngineError::invalid_with_reason(
            raw,
            format!("{} is not a map and must not have a key", setting.name),
        ));
    }

    let expr = Expression::new(setting, scope, key, value);

    let operation = derive_operation(&expr);
    validate(&expr, operation)?;

    tracing::debug!(text = %expr.to_text(), %operation, "parsed expression");
    Ok(expr)
}

/// Consume the optional `stripe.<id>[.node.<id>]` prefix from `tokens`,
/// returning the resolved [`Scope`] and the remaining tokens (the
/// setting reference).
fn parse_scope_prefix<'a>(tokens: &[&'a str], raw: &str) -> Result<(Scope, Vec<&'a str>), EngineError> {
    if tokens.is_empty() {
        return Ok((Scope::Cluster, Vec::new()));
    }

    if tokens[0] == "node" {
        // A bare "node.<id>..." prefix with no enclosing stripe is not
        // one of the three legal shapes.
        return Err(EngineError::bare_invalid(raw));
    }

    if tokens[0] != "stripe" {
        return Ok((Scope::Cluster, tokens.to_vec()));
    }

    if tokens.len() < 2 {
        return Err(EngineError::bare_invalid(raw));
    }
    let stripe_id = parse_id(tokens[1], "stripe", raw)?;

    let mut idx = 2;
    let scope = if idx < tokens.len() && tokens[idx] == "node" {
        if tokens.len() < idx + 2 {
            return Err(EngineError::bare_invalid(raw));
        }
        let node_id = parse_id(tokens[idx + 1], "node", raw)?;
        idx += 2;
        Scope::Node { stripe_id, node_id }
    } else {
        Scope::Stripe { stripe_id }
    };

    // Reject repeated/out-of-order prefix tokens: "stripe.1.stripe.1",
    // "stripe.1.node.1.node.1".
    if idx < tokens.len() && (tokens[idx] == "stripe" || tokens[idx] == "node") {
        return Err(EngineError::bare_invalid(raw));
    }

    Ok((scope, tokens[idx..].to_vec()))
}

fn parse_id(token: &str, kind: &str, raw: &str) -> Result<u32, EngineError> {
    match token.parse::<u32>() {
        Ok(0) => Err(EngineError::invalid_with_reason(
            raw,
            format!("Expected {kind} ID to be greater than 0"),
        )),
        Ok(n) => Ok(n),
        Err(_) => Err(EngineError::bare_invalid(raw)),
    }
}
