//! GraphQL execution context.
//!
//! The context holds the backend collaborators the resolvers call into. It
//! is assembled once at startup as a template and cloned into every request;
//! all fields are `Arc`-shared and immutable, so clones are cheap and
//! requests never share mutable state.
//!
//! # Example
//!
//! ```ignore
//! use cdp_graphql::GraphQLContextBuilder;
//!
//! let context = GraphQLContextBuilder::new()
//!     .with_events(events.clone())
//!     .with_segments(segments.clone())
//!     .with_definitions(definitions.clone())
//!     .with_default_page_size(10)
//!     .build()?;
//! ```

use cdp_backend::{DynDefinitionsService, DynEventService, DynSegmentService};

/// GraphQL execution context.
///
/// Passed through the async-graphql context system; resolvers fetch it with
/// `ctx.data::<GraphQLContext>()`.
#[derive(Clone)]
pub struct GraphQLContext {
    /// Event search backend.
    pub events: DynEventService,

    /// Segment search/lookup backend.
    pub segments: DynSegmentService,

    /// Condition type definitions backend.
    pub definitions: DynDefinitionsService,

    /// Page size used when a connection field is queried without `first`.
    pub default_page_size: u64,
}

impl GraphQLContext {
    /// Creates a new builder for `GraphQLContext`.
    #[must_use]
    pub fn builder() -> GraphQLContextBuilder {
        GraphQLContextBuilder::default()
    }
}

/// Builder for constructing [`GraphQLContext`].
///
/// Validates that all required collaborators are provided before creating
/// the context.
#[derive(Default)]
pub struct GraphQLContextBuilder {
    events: Option<DynEventService>,
    segments: Option<DynSegmentService>,
    definitions: Option<DynDefinitionsService>,
    default_page_size: Option<u64>,
}

impl GraphQLContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the event service.
    #[must_use]
    pub fn with_events(mut self, events: DynEventService) -> Self {
        self.events = Some(events);
        self
    }

    /// Sets the segment service.
    #[must_use]
    pub fn with_segments(mut self, segments: DynSegmentService) -> Self {
        self.segments = Some(segments);
        self
    }

    /// Sets the definitions service.
    #[must_use]
    pub fn with_definitions(mut self, definitions: DynDefinitionsService) -> Self {
        self.definitions = Some(definitions);
        self
    }

    /// Sets the default page size.
    #[must_use]
    pub fn with_default_page_size(mut self, size: u64) -> Self {
        self.default_page_size = Some(size);
        self
    }

    /// Builds the `GraphQLContext`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required collaborator is missing.
    pub fn build(self) -> Result<GraphQLContext, ContextBuilderError> {
        let events = self
            .events
            .ok_or(ContextBuilderError::MissingField("events"))?;

        let segments = self
            .segments
            .ok_or(ContextBuilderError::MissingField("segments"))?;

        let definitions = self
            .definitions
            .ok_or(ContextBuilderError::MissingField("definitions"))?;

        Ok(GraphQLContext {
            events,
            segments,
            definitions,
            default_page_size: self.default_page_size.unwrap_or(10),
        })
    }
}

/// Errors that can occur when building a `GraphQLContext`.
#[derive(Debug, thiserror::Error)]
pub enum ContextBuilderError {
    /// A required collaborator was not provided.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
