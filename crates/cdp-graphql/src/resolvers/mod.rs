//! Field resolvers for the CDP query surface.
//!
//! - `events`: cursor-paginated event search (`CDP_Query.findEvents`)
//! - `segments`: cursor-paginated segment search (`CDP_Query.findSegments`)
//! - `connection`: shared cursor/pagination plumbing
//! - `filter`: GraphQL filter input to backend condition translation
//! - `profile`: composite profile identity construction

mod connection;
mod filter;
mod profile;

pub mod events;
pub mod segments;

pub use connection::{ConnectionPage, paginate};
pub use events::EventSearchResolver;
pub use filter::ConditionTranslator;
pub use profile::{ClientDescriptor, ProfileIdentity};
pub use segments::SegmentSearchResolver;

use async_graphql::dynamic::{ResolverContext, ValueAccessor};
use async_graphql::{Error, Value};

use crate::context::GraphQLContext;

/// Helper to extract the bridge context from a resolver context.
pub(crate) fn get_graphql_context<'a>(
    ctx: &'a ResolverContext<'_>,
) -> Result<&'a GraphQLContext, Error> {
    ctx.data::<GraphQLContext>()
        .map_err(|_| Error::new("GraphQL context not available"))
}

/// Convert a serde_json::Value to async_graphql::Value.
pub(crate) fn json_to_graphql_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else if let Some(f) = n.as_f64() {
                Value::Number(
                    async_graphql::Number::from_f64(f)
                        .unwrap_or_else(|| async_graphql::Number::from(0)),
                )
            } else {
                Value::Null
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => {
            Value::List(arr.into_iter().map(json_to_graphql_value).collect())
        }
        serde_json::Value::Object(obj) => {
            let map: async_graphql::indexmap::IndexMap<async_graphql::Name, Value> = obj
                .into_iter()
                .map(|(k, v)| (async_graphql::Name::new(k), json_to_graphql_value(v)))
                .collect();
            Value::Object(map)
        }
    }
}

/// Converts an argument accessor to serde_json::Value.
pub(crate) fn value_accessor_to_json(
    value: &ValueAccessor<'_>,
) -> Result<serde_json::Value, Error> {
    if value.is_null() {
        return Ok(serde_json::Value::Null);
    }

    if let Ok(b) = value.boolean() {
        return Ok(serde_json::Value::Bool(b));
    }

    if let Ok(i) = value.i64() {
        return Ok(serde_json::Value::Number(i.into()));
    }

    if let Ok(f) = value.f64() {
        return Ok(serde_json::json!(f));
    }

    if let Ok(s) = value.string() {
        return Ok(serde_json::Value::String(s.to_string()));
    }

    if let Ok(list) = value.list() {
        let items: Result<Vec<serde_json::Value>, Error> =
            list.iter().map(|v| value_accessor_to_json(&v)).collect();
        return Ok(serde_json::Value::Array(items?));
    }

    if let Ok(obj) = value.object() {
        let mut map = serde_json::Map::new();
        for (k, v) in obj.iter() {
            map.insert(k.to_string(), value_accessor_to_json(&v)?);
        }
        return Ok(serde_json::Value::Object(map));
    }

    Ok(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_conversion_nested() {
        let json = serde_json::json!({
            "id": "e1",
            "count": 3,
            "flags": [true, false],
            "nested": { "path": "/home" },
            "missing": null
        });

        let Value::Object(obj) = json_to_graphql_value(json) else {
            panic!("expected object");
        };
        assert_eq!(obj.get("id"), Some(&Value::String("e1".into())));
        assert_eq!(obj.get("count"), Some(&Value::Number(3.into())));
        assert_eq!(obj.get("missing"), Some(&Value::Null));
        assert!(matches!(obj.get("flags"), Some(Value::List(_))));
    }
}
