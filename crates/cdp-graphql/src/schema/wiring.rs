//! The CDP resolver wiring.
//!
//! Binds the merged schema's runtime behavior in one place: scalar
//! coercions, the event interface's concrete-type dispatch, and the
//! explicit resolvers on the query namespace. Everything else falls through
//! to the generated default property resolver.

use async_graphql::Value;
use async_graphql::dynamic::FieldFuture;
use async_graphql::indexmap::IndexMap;

use crate::resolvers::{EventSearchResolver, SegmentSearchResolver};
use crate::schema::bindings::ResolverBindings;
use crate::types::{EventKind, standard_coercions, workaround_coercions};

/// Name of the root query type declared by the CDP schema document.
pub const QUERY_TYPE: &str = "Query";

/// Name of the CDP query namespace type.
pub const CDP_QUERY_TYPE: &str = "CDP_Query";

/// Name of the abstract event interface.
pub const EVENT_INTERFACE: &str = "CDP_EventInterface";

/// The full set of bindings for the CDP query surface.
#[must_use]
pub fn cdp_bindings() -> ResolverBindings {
    ResolverBindings::new()
        .scalars(standard_coercions())
        .scalars(workaround_coercions())
        .type_resolver(EVENT_INTERFACE, |node| {
            EventKind::from_node(node).object_type().to_string()
        })
        // The namespace field carries no data of its own; an empty object
        // lets the namespace's child fields resolve.
        .field(QUERY_TYPE, "cdp", |_ctx| {
            FieldFuture::new(async move { Ok(Some(Value::Object(IndexMap::new()))) })
        })
        .field(CDP_QUERY_TYPE, "findEvents", EventSearchResolver::resolve())
        .field(
            CDP_QUERY_TYPE,
            "findSegments",
            SegmentSearchResolver::resolve(),
        )
        .field(CDP_QUERY_TYPE, "unomiVersion", |_ctx| {
            FieldFuture::new(async move {
                Ok(Some(Value::String(env!("CARGO_PKG_VERSION").to_string())))
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphQLConfig;
    use crate::schema::documents::embedded_documents;
    use crate::schema::registry::SchemaRegistry;

    #[test]
    fn test_bindings_compile_against_embedded_documents() {
        let registry = SchemaRegistry::merge(&embedded_documents()).unwrap();
        let schema = cdp_bindings().bind(&registry, &GraphQLConfig::default());
        assert!(schema.is_ok(), "bind failed: {:?}", schema.err());
    }

    #[test]
    fn test_schema_sdl_exposes_merged_surface() {
        let registry = SchemaRegistry::merge(&embedded_documents()).unwrap();
        let schema = cdp_bindings()
            .bind(&registry, &GraphQLConfig::default())
            .unwrap();

        let sdl = schema.sdl();
        assert!(sdl.contains("findEvents"));
        assert!(sdl.contains("unomiVersion"));
        assert!(sdl.contains("Unomi_PageViewEvent"));
        assert!(sdl.contains("scalar EmptyTypeWorkAround"));
    }
}
