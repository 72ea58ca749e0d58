//! # cdp-graphql
//!
//! GraphQL query-execution bridge over an event-tracking and segmentation
//! backend.
//!
//! The bridge merges independently-authored SDL schema documents into one
//! executable schema, attaches resolvers and scalar coercions, and executes
//! queries against backend collaborators. It supports:
//!
//! - Cursor-paginated event and segment search connections
//! - Abstract event interface with concrete-type dispatch per node
//! - Scalar coercions, including pass-through workaround scalars
//! - Composite profile identities with collision-free URIs
//!
//! ## Overview
//!
//! Startup merges the schema documents (conflicts are fatal), compiles the
//! executable schema, and wraps it in a [`QueryExecutor`]. At query time,
//! every failure past the blank-query guard is a structured error entry in
//! the response.
//!
//! ## Configuration
//!
//! Add to the host's TOML config:
//!
//! ```toml
//! [graphql]
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! default_page_size = 10
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration options
//! - [`types`] - Scalar coercions and type-dispatch helpers
//! - [`schema`] - Document merge and schema compilation
//! - [`context`] - GraphQL execution context
//! - [`resolvers`] - Field resolvers for the CDP query surface
//! - [`executor`] - Query execution entry point
//! - [`startup`] - Bridge assembly
//! - [`error`] - Error types for GraphQL operations
//!
//! ## Example
//!
//! ```ignore
//! use cdp_graphql::{CdpServices, GraphQLConfig, build_executor};
//!
//! let services = CdpServices { events, segments, definitions };
//! let executor = build_executor(services, &GraphQLConfig::default())?;
//! let response = executor
//!     .execute("{ cdp { findEvents(first: 2) { edges { cursor } } } }", None, None)
//!     .await?;
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod resolvers;
pub mod schema;
pub mod startup;
pub mod types;

// Re-export main types
pub use config::GraphQLConfig;
pub use context::{GraphQLContext, GraphQLContextBuilder};
pub use error::GraphQLError;
pub use executor::{INTROSPECTION_QUERY, QueryExecutor};
pub use schema::{ResolverBindings, SchemaDocument, SchemaRegistry, cdp_bindings, embedded_documents};
pub use startup::{CdpServices, build_executor, build_executor_with_documents};

/// Result type for GraphQL operations.
pub type Result<T> = std::result::Result<T, GraphQLError>;
