//! Argument coercion shared by every resolver

use async_graphql::Value;
use async_graphql::dynamic::ResolverContext;

use crate::core::entity::EntityId;
use crate::core::error::ResolveError;

/// Read argument `name` from the field and coerce it to an identifier
///
/// `ID` arguments arrive as strings, or as integers when the document uses an
/// integer literal; both are accepted. Anything else is an `INVALID_ID` error
/// for this field only.
pub fn coerce_id(ctx: &ResolverContext<'_>, name: &str) -> Result<EntityId, ResolveError> {
    let value = ctx
        .args
        .get(name)
        .ok_or_else(|| ResolveError::invalid_id(name, "<missing>"))?;
    parse_id(name, value.as_value())
}

/// Coerce a GraphQL value to an identifier
pub fn parse_id(name: &str, value: &Value) -> Result<EntityId, ResolveError> {
    match value {
        Value::String(s) => s
            .parse::<EntityId>()
            .map_err(|_| ResolveError::invalid_id(name, s.as_str())),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ResolveError::invalid_id(name, n.to_string())),
        other => Err(ResolveError::invalid_id(name, other.to_string())),
    }
}

/// Read a required string argument
pub fn required_string(ctx: &ResolverContext<'_>, name: &str) -> Result<String, ResolveError> {
    ctx.args
        .get(name)
        .and_then(|v| v.string().ok().map(str::to_string))
        .ok_or_else(|| ResolveError::validation(name, "expected a string"))
}
