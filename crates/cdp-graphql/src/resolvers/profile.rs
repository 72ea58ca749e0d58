//! Composite profile identity construction.
//!
//! Every profile reference this backend emits belongs to a single fixed
//! client system; the identity URI namespaces the raw profile identifier
//! under that client so identities from different client systems can never
//! collide.

use async_graphql::{Name, Value, indexmap::IndexMap};

/// URI scheme prefix for profile identities.
const PROFILE_URI_SCHEME: &str = "cdp_profile";

/// Identifier of the fixed client system this backend represents.
const CLIENT_ID: &str = "unomi";

/// Display title of the fixed client system.
const CLIENT_TITLE: &str = "Default Unomi client";

/// The client system a profile identity belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDescriptor {
    /// Client identifier.
    pub id: String,
    /// Human-readable client title.
    pub title: String,
}

impl ClientDescriptor {
    /// The single fixed client this backend exposes.
    #[must_use]
    pub fn fixed() -> Self {
        Self {
            id: CLIENT_ID.to_string(),
            title: CLIENT_TITLE.to_string(),
        }
    }
}

/// Composite external identity of a profile within a client system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileIdentity {
    /// Raw profile identifier.
    pub id: String,
    /// Owning client system.
    pub client: ClientDescriptor,
    /// Globally unique identity URI.
    pub uri: String,
}

impl ProfileIdentity {
    /// Builds the identity for a raw profile identifier.
    #[must_use]
    pub fn identify(profile_id: impl Into<String>) -> Self {
        let id = profile_id.into();
        let client = ClientDescriptor::fixed();
        let uri = format!("{PROFILE_URI_SCHEME}:{}/{id}", client.id);
        Self { id, client, uri }
    }

    /// Shapes the identity as a GraphQL value for the `CDP_ProfileID` type.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut client = IndexMap::new();
        client.insert(Name::new("id"), Value::String(self.client.id.clone()));
        client.insert(Name::new("title"), Value::String(self.client.title.clone()));

        let mut identity = IndexMap::new();
        identity.insert(Name::new("client"), Value::Object(client));
        identity.insert(Name::new("id"), Value::String(self.id.clone()));
        identity.insert(Name::new("uri"), Value::String(self.uri.clone()));
        Value::Object(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_namespaces_id_under_client() {
        let identity = ProfileIdentity::identify("abc");
        assert_eq!(identity.uri, "cdp_profile:unomi/abc");
        assert_eq!(identity.client.id, "unomi");
        assert_eq!(identity.client.title, "Default Unomi client");
    }

    #[test]
    fn test_distinct_ids_yield_distinct_uris() {
        assert_ne!(
            ProfileIdentity::identify("a").uri,
            ProfileIdentity::identify("b").uri
        );
    }

    #[test]
    fn test_value_shape() {
        let Value::Object(identity) = ProfileIdentity::identify("p-1").to_value() else {
            panic!("expected object");
        };
        assert_eq!(identity.get("id"), Some(&Value::String("p-1".into())));
        assert_eq!(
            identity.get("uri"),
            Some(&Value::String("cdp_profile:unomi/p-1".into()))
        );
        assert!(matches!(identity.get("client"), Some(Value::Object(_))));
    }
}
