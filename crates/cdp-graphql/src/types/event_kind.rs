//! Concrete type dispatch for the abstract event interface.
//!
//! Event nodes carry a resolver-internal discriminator field (never part of
//! the public schema) naming the backend event type. [`EventKind`] maps that
//! discriminator to the concrete schema type, with an explicit `Unknown`
//! fallback so resolution is total: it never fails and never returns
//! "no type".

use async_graphql::Value;

/// Resolver-internal discriminator key carried on event node values.
pub const EVENT_TYPE_DISCRIMINATOR: &str = "__unomiEventType";

/// The concrete kinds an abstract event can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A page view event.
    PageView,
    /// A session creation event.
    SessionCreated,
    /// Any event type without a dedicated schema type.
    Unknown,
}

impl EventKind {
    /// Maps a discriminator value to an event kind. Unrecognized or missing
    /// discriminators map to [`EventKind::Unknown`].
    #[must_use]
    pub fn from_discriminator(discriminator: Option<&str>) -> Self {
        match discriminator {
            Some("view") => Self::PageView,
            Some("sessionCreated") => Self::SessionCreated,
            _ => Self::Unknown,
        }
    }

    /// Reads the discriminator off a resolved node value.
    #[must_use]
    pub fn from_node(node: &Value) -> Self {
        let discriminator = match node {
            Value::Object(fields) => fields
                .get(EVENT_TYPE_DISCRIMINATOR)
                .and_then(|v| match v {
                    Value::String(s) => Some(s.as_str()),
                    _ => None,
                }),
            _ => None,
        };
        Self::from_discriminator(discriminator)
    }

    /// The concrete schema type name this kind resolves to.
    #[must_use]
    pub fn object_type(self) -> &'static str {
        match self {
            Self::PageView => "Unomi_PageViewEvent",
            Self::SessionCreated => "Unomi_SessionCreatedEvent",
            Self::Unknown => "Unomi_UnknownEvent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{Name, indexmap::IndexMap};

    fn node_with_discriminator(value: Option<Value>) -> Value {
        let mut fields = IndexMap::new();
        fields.insert(Name::new("id"), Value::String("e1".into()));
        if let Some(v) = value {
            fields.insert(Name::new(EVENT_TYPE_DISCRIMINATOR), v);
        }
        Value::Object(fields)
    }

    #[test]
    fn test_known_discriminators() {
        assert_eq!(
            EventKind::from_discriminator(Some("view")),
            EventKind::PageView
        );
        assert_eq!(
            EventKind::from_discriminator(Some("sessionCreated")),
            EventKind::SessionCreated
        );
    }

    #[test]
    fn test_resolution_is_total() {
        assert_eq!(
            EventKind::from_discriminator(Some("somethingElse")),
            EventKind::Unknown
        );
        assert_eq!(EventKind::from_discriminator(None), EventKind::Unknown);
        assert_eq!(
            EventKind::from_node(&node_with_discriminator(None)),
            EventKind::Unknown
        );
        // Non-string discriminators also fall through to Unknown.
        assert_eq!(
            EventKind::from_node(&node_with_discriminator(Some(Value::Number(1.into())))),
            EventKind::Unknown
        );
        assert_eq!(EventKind::from_node(&Value::Null), EventKind::Unknown);
    }

    #[test]
    fn test_object_types() {
        assert_eq!(EventKind::PageView.object_type(), "Unomi_PageViewEvent");
        assert_eq!(
            EventKind::SessionCreated.object_type(),
            "Unomi_SessionCreatedEvent"
        );
        assert_eq!(EventKind::Unknown.object_type(), "Unomi_UnknownEvent");
    }

    #[test]
    fn test_node_dispatch() {
        let node = node_with_discriminator(Some(Value::String("view".into())));
        assert_eq!(EventKind::from_node(&node).object_type(), "Unomi_PageViewEvent");
    }
}
