//! Bridge assembly.
//!
//! Wires the backend collaborators, the schema documents, and the resolver
//! bindings into a ready [`QueryExecutor`]. Any schema problem surfaces
//! here, at startup, never at query time.

use cdp_backend::{DynDefinitionsService, DynEventService, DynSegmentService};
use tracing::info;

use crate::config::GraphQLConfig;
use crate::context::GraphQLContext;
use crate::error::GraphQLError;
use crate::executor::QueryExecutor;
use crate::schema::{SchemaDocument, SchemaRegistry, cdp_bindings, embedded_documents};

/// The backend collaborators the bridge resolves against.
#[derive(Clone)]
pub struct CdpServices {
    /// Event search backend.
    pub events: DynEventService,
    /// Segment search/lookup backend.
    pub segments: DynSegmentService,
    /// Condition type definitions backend.
    pub definitions: DynDefinitionsService,
}

/// Builds an executor over the embedded schema documents.
///
/// # Errors
///
/// Returns a fatal error when the documents conflict or the executable
/// schema cannot be compiled.
pub fn build_executor(
    services: CdpServices,
    config: &GraphQLConfig,
) -> Result<QueryExecutor, GraphQLError> {
    build_executor_with_documents(services, config, &embedded_documents())
}

/// Builds an executor over an explicit set of schema documents, merged in
/// the given order.
///
/// # Errors
///
/// Returns a fatal error when a document cannot be parsed, the documents
/// conflict, or the executable schema cannot be compiled.
pub fn build_executor_with_documents(
    services: CdpServices,
    config: &GraphQLConfig,
    documents: &[SchemaDocument],
) -> Result<QueryExecutor, GraphQLError> {
    config
        .validate()
        .map_err(GraphQLError::Internal)?;

    let registry = SchemaRegistry::merge(documents)?;
    let schema = cdp_bindings().bind(&registry, config)?;

    let context = GraphQLContext::builder()
        .with_events(services.events)
        .with_segments(services.segments)
        .with_definitions(services.definitions)
        .with_default_page_size(config.default_page_size)
        .build()
        .map_err(|e| GraphQLError::Internal(e.to_string()))?;

    info!(
        documents = documents.len(),
        query_root = registry.query_root(),
        "GraphQL bridge ready"
    );

    Ok(QueryExecutor::new(schema, context))
}
