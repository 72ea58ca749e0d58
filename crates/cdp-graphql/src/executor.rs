//! Query execution entry point.
//!
//! [`QueryExecutor`] wraps the compiled schema plus the context template.
//! Every query-time failure past the blank-query guard is reported as a
//! structured error entry in the response; execution itself never fails.

use async_graphql::{Request, Response, Variables};
use tracing::debug;

use crate::context::GraphQLContext;
use crate::error::GraphQLError;

/// The standard introspection query used to render the full schema surface.
pub const INTROSPECTION_QUERY: &str = r"
query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      ...FullType
    }
    directives {
      name
      description
      locations
      args { ...InputValue }
    }
  }
}
fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args { ...InputValue }
    type { ...TypeRef }
    isDeprecated
    deprecationReason
  }
  inputFields { ...InputValue }
  interfaces { ...TypeRef }
  enumValues(includeDeprecated: true) {
    name
    description
    isDeprecated
    deprecationReason
  }
  possibleTypes { ...TypeRef }
}
fragment InputValue on __InputValue {
  name
  description
  type { ...TypeRef }
  defaultValue
}
fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
              }
            }
          }
        }
      }
    }
  }
}
";

/// Executes GraphQL queries against the compiled schema.
pub struct QueryExecutor {
    schema: async_graphql::dynamic::Schema,
    context: GraphQLContext,
}

// The schema and context hold resolver closures and trait objects, so the
// representation stays opaque.
impl std::fmt::Debug for QueryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryExecutor").finish_non_exhaustive()
    }
}

impl QueryExecutor {
    /// Creates an executor from a compiled schema and a context template.
    #[must_use]
    pub fn new(schema: async_graphql::dynamic::Schema, context: GraphQLContext) -> Self {
        Self { schema, context }
    }

    /// Executes one query.
    ///
    /// The context template is cloned into the request, so concurrent calls
    /// never share mutable state.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::EmptyQuery` when the query string is blank,
    /// before any engine interaction. All other failures are structured
    /// error entries inside the returned response.
    pub async fn execute(
        &self,
        query: &str,
        operation_name: Option<&str>,
        variables: Option<serde_json::Value>,
    ) -> Result<Response, GraphQLError> {
        if query.trim().is_empty() {
            return Err(GraphQLError::EmptyQuery);
        }

        let mut request = Request::new(query);

        if let Some(op_name) = operation_name {
            request = request.operation_name(op_name);
        }

        if let Some(vars) = variables {
            request = request.variables(Variables::from_json(vars));
        }

        request = request.data(self.context.clone());

        debug!(operation_name = ?operation_name, "executing GraphQL query");
        Ok(self.schema.execute(request).await)
    }

    /// Executes the standard introspection query.
    ///
    /// # Errors
    ///
    /// Never returns `EmptyQuery`; present for signature symmetry with
    /// [`execute`](Self::execute).
    pub async fn execute_introspection(&self) -> Result<Response, GraphQLError> {
        self.execute(INTROSPECTION_QUERY, Some("IntrospectionQuery"), None)
            .await
    }

    /// The schema this executor runs against, rendered as SDL.
    #[must_use]
    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }
}
