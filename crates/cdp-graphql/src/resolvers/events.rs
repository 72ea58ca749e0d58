//! Event search resolver.
//!
//! Resolves `findEvents(filter, first, after)`: translates the filter into
//! a backend condition, runs a windowed event search, and shapes each hit
//! as an event node. Nodes carry the type discriminator the interface
//! dispatch reads, plus the backend payload flattened under prefixed keys
//! so the concrete event types can project their own fields.

use async_graphql::dynamic::{FieldFuture, ResolverContext};
use async_graphql::{Error, Name, Value, indexmap::IndexMap};
use cdp_backend::Event;
use tracing::{debug, warn};

use super::{
    ConditionTranslator, ConnectionPage, ProfileIdentity, get_graphql_context,
    json_to_graphql_value, paginate, value_accessor_to_json,
};
use crate::types::EVENT_TYPE_DISCRIMINATOR;

/// Prefix under which backend payload keys appear on the node.
const PROPERTY_PREFIX: &str = "unomi_";

/// Resolver for the event connection field.
pub struct EventSearchResolver;

impl EventSearchResolver {
    /// Creates the resolver function for `findEvents`.
    pub fn resolve() -> impl for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync + Clone
    {
        |ctx| {
            FieldFuture::new(async move {
                debug!("resolving event search");

                let gql_ctx = get_graphql_context(&ctx)?;

                let first = ctx
                    .args
                    .get("first")
                    .filter(|v| !v.is_null())
                    .map(|v| v.i64())
                    .transpose()?;
                let after = ctx
                    .args
                    .get("after")
                    .filter(|v| !v.is_null())
                    .map(|v| v.string().map(str::to_string))
                    .transpose()?;
                let filter = ctx
                    .args
                    .get("filter")
                    .filter(|v| !v.is_null())
                    .map(|v| value_accessor_to_json(&v))
                    .transpose()?;

                let condition =
                    ConditionTranslator::translate(filter.as_ref(), &gql_ctx.definitions)
                        .await
                        .map_err(|e| {
                            warn!(error = %e, "filter translation failed");
                            Error::new(e.to_string())
                        })?;

                let connection = paginate(
                    first,
                    after.as_deref(),
                    gql_ctx.default_page_size,
                    |offset, limit| {
                        let events = gql_ctx.events.clone();
                        let condition = condition.clone();
                        async move {
                            let page = events
                                .search_events(&condition, offset, limit)
                                .await
                                .map_err(|e| {
                                    warn!(error = %e, "event search failed");
                                    Error::new(e.to_string())
                                })?;

                            debug!(
                                returned = page.len(),
                                total = page.total_size,
                                "event search completed"
                            );

                            let total = page.total_size;
                            let edges = page
                                .list
                                .into_iter()
                                .map(|event| (event.item_id.clone(), event_node(event)))
                                .collect();
                            Ok(ConnectionPage { edges, total })
                        }
                    },
                )
                .await?;

                Ok(Some(connection))
            })
        }
    }
}

/// Shapes one backend event as a node value.
///
/// Payload keys are flattened onto the node under the property prefix so
/// fields like `unomi_pagePath` project directly; the full payload stays
/// available under `unomi_properties`.
fn event_node(event: Event) -> Value {
    let mut node = IndexMap::new();
    node.insert(Name::new("id"), Value::String(event.item_id));
    node.insert(
        Name::new(EVENT_TYPE_DISCRIMINATOR),
        Value::String(event.event_type.clone()),
    );
    node.insert(
        Name::new("cdp_profileID"),
        ProfileIdentity::identify(event.profile_id).to_value(),
    );
    node.insert(
        Name::new("unomi_scope"),
        event.scope.map_or(Value::Null, Value::String),
    );
    node.insert(
        Name::new("unomi_eventType"),
        Value::String(event.event_type),
    );

    if let serde_json::Value::Object(properties) = &event.properties {
        for (key, value) in properties {
            let prefixed = format!("{PROPERTY_PREFIX}{key}");
            if !node.contains_key(prefixed.as_str()) {
                node.insert(Name::new(prefixed), json_to_graphql_value(value.clone()));
            }
        }
    }

    node.insert(
        Name::new("unomi_properties"),
        json_to_graphql_value(event.properties),
    );

    Value::Object(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventKind;
    use serde_json::json;

    #[test]
    fn test_node_shape() {
        let event = Event::new("evt-1", "view", "profile-1")
            .with_scope("web")
            .with_properties(json!({"pagePath": "/home", "referrer": "https://a.example"}));

        let Value::Object(node) = event_node(event) else {
            panic!("expected object");
        };

        assert_eq!(node.get("id"), Some(&Value::String("evt-1".into())));
        assert_eq!(
            node.get(EVENT_TYPE_DISCRIMINATOR),
            Some(&Value::String("view".into()))
        );
        assert_eq!(
            node.get("unomi_scope"),
            Some(&Value::String("web".into()))
        );
        assert_eq!(
            node.get("unomi_pagePath"),
            Some(&Value::String("/home".into()))
        );
        assert!(matches!(node.get("unomi_properties"), Some(Value::Object(_))));

        let Some(Value::Object(profile)) = node.get("cdp_profileID") else {
            panic!("missing cdp_profileID");
        };
        assert_eq!(
            profile.get("uri"),
            Some(&Value::String("cdp_profile:unomi/profile-1".into()))
        );
    }

    #[test]
    fn test_node_dispatches_to_concrete_type() {
        let node = event_node(Event::new("evt-1", "view", "p"));
        assert_eq!(
            EventKind::from_node(&node).object_type(),
            "Unomi_PageViewEvent"
        );

        let node = event_node(Event::new("evt-2", "somethingElse", "p"));
        assert_eq!(
            EventKind::from_node(&node).object_type(),
            "Unomi_UnknownEvent"
        );
    }

    #[test]
    fn test_payload_keys_never_shadow_reserved_fields() {
        let event = Event::new("evt-1", "view", "p")
            .with_properties(json!({"scope": "forged", "eventType": "forged"}));

        let Value::Object(node) = event_node(event) else {
            panic!("expected object");
        };
        // Reserved names were written first and win.
        assert_eq!(node.get("unomi_scope"), Some(&Value::Null));
        assert_eq!(
            node.get("unomi_eventType"),
            Some(&Value::String("view".into()))
        );
    }
}
