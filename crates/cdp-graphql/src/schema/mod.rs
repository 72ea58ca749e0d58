//! Schema document merge and executable schema compilation.
//!
//! ## Components
//!
//! - [`SchemaDocument`] - One SDL document plus its origin identifier
//! - [`SchemaRegistry`] - The merged view over all documents
//! - [`ResolverBindings`] - Runtime behavior attached to the registry
//! - [`cdp_bindings`] - The wiring for the CDP query surface
//!
//! ## Architecture
//!
//! Startup compiles the schema in three steps:
//! 1. Load the schema documents (embedded, or from disk)
//! 2. Merge them in order into a [`SchemaRegistry`]; shape conflicts abort
//! 3. Bind resolvers and coercions, producing the executable schema

mod bindings;
mod documents;
mod registry;
mod wiring;

pub use bindings::{BoxFieldResolver, ResolverBindings, TypeResolverFn};
pub use documents::{CDP_SCHEMA_ORIGIN, SchemaDocument, UNOMI_SCHEMA_ORIGIN, embedded_documents};
pub use registry::{ArgumentDef, FieldDef, SchemaRegistry, TypeEntry, TypeShape};
pub use wiring::{CDP_QUERY_TYPE, EVENT_INTERFACE, QUERY_TYPE, cdp_bindings};
