//! Error types for the GraphQL bridge.
//!
//! Only two failure classes are fatal: startup-time schema problems
//! (conflicts, unloadable documents, build failures) and a blank query
//! before any engine interaction. Every query-time failure is represented
//! as a structured error entry in the response, never thrown across the
//! system boundary.

use std::fmt;

/// Errors that can occur in the GraphQL bridge.
#[derive(Debug)]
pub enum GraphQLError {
    /// The request carried an empty or missing query string.
    EmptyQuery,

    /// Two schema documents declared the same type with incompatible shapes.
    SchemaConflict {
        /// The conflicting type name.
        type_name: String,
        /// Origin of the first declaration.
        first_origin: String,
        /// Origin of the conflicting declaration.
        second_origin: String,
        /// What exactly conflicts.
        detail: String,
    },

    /// A named schema document could not be loaded or parsed.
    SchemaResource {
        /// The document's origin identifier.
        origin: String,
        /// Description of the failure.
        message: String,
    },

    /// The merged registry could not be compiled into an executable schema.
    SchemaBuildFailed(String),

    /// A pagination cursor failed to decode.
    Pagination(String),

    /// An interface was queried without a registered type resolver.
    MissingTypeResolver {
        /// The interface name.
        interface: String,
    },

    /// A backend collaborator call failed.
    Backend(String),

    /// An internal bridge error occurred.
    Internal(String),
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQuery => {
                write!(f, "Query cannot be empty or null")
            }
            Self::SchemaConflict {
                type_name,
                first_origin,
                second_origin,
                detail,
            } => {
                write!(
                    f,
                    "Schema conflict on type `{type_name}` between `{first_origin}` and `{second_origin}`: {detail}"
                )
            }
            Self::SchemaResource { origin, message } => {
                write!(f, "Failed to load schema document `{origin}`: {message}")
            }
            Self::SchemaBuildFailed(msg) => {
                write!(f, "Failed to build executable schema: {msg}")
            }
            Self::Pagination(msg) => {
                write!(f, "Pagination error: {msg}")
            }
            Self::MissingTypeResolver { interface } => {
                write!(f, "No type resolver registered for interface `{interface}`")
            }
            Self::Backend(msg) => {
                write!(f, "Backend error: {msg}")
            }
            Self::Internal(msg) => {
                write!(f, "Internal error: {msg}")
            }
        }
    }
}

impl std::error::Error for GraphQLError {}

impl GraphQLError {
    /// Returns the error code used in GraphQL error extensions.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "EMPTY_QUERY",
            Self::SchemaConflict { .. } => "SCHEMA_CONFLICT",
            Self::SchemaResource { .. } => "SCHEMA_RESOURCE",
            Self::SchemaBuildFailed(_) => "SCHEMA_BUILD_FAILED",
            Self::Pagination(_) => "PAGINATION_ERROR",
            Self::MissingTypeResolver { .. } => "MISSING_TYPE_RESOLVER",
            Self::Backend(_) => "BACKEND_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether the error is fatal to service startup (as opposed to
    /// scoped to a single request or field).
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SchemaConflict { .. } | Self::SchemaResource { .. } | Self::SchemaBuildFailed(_)
        )
    }
}

impl From<cdp_backend::BackendError> for GraphQLError {
    fn from(err: cdp_backend::BackendError) -> Self {
        Self::Backend(err.to_string())
    }
}
