//! Collaborator traits the GraphQL bridge resolves against.
//!
//! These traits define the contract the bridge expects from the
//! event-tracking and segmentation backend. Implementations must be
//! thread-safe (`Send + Sync`); the bridge calls them from concurrent
//! request resolvers without any additional synchronization.

use async_trait::async_trait;

use crate::condition::{Condition, ConditionType};
use crate::error::BackendError;
use crate::types::{Event, PartialList, Segment, SegmentSummary};

/// Search access to tracked events.
#[async_trait]
pub trait EventService: Send + Sync {
    /// Searches events matching `condition`, returning the page starting at
    /// `offset` with at most `limit` items plus the total match count.
    ///
    /// # Errors
    ///
    /// Returns an error for infrastructure issues or rejected queries, not
    /// for empty result sets.
    async fn search_events(
        &self,
        condition: &Condition,
        offset: u64,
        limit: u64,
    ) -> Result<PartialList<Event>, BackendError>;
}

/// Search and lookup access to segment definitions.
#[async_trait]
pub trait SegmentService: Send + Sync {
    /// Searches segment metadata matching `condition`.
    ///
    /// # Errors
    ///
    /// Returns an error for infrastructure issues or rejected queries.
    async fn search_segment_metadata(
        &self,
        condition: &Condition,
        limit: u64,
        offset: u64,
    ) -> Result<PartialList<SegmentSummary>, BackendError>;

    /// Returns the full definition of a segment, including its membership
    /// condition.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::SegmentNotFound` if the segment does not exist.
    async fn get_segment_definition(&self, segment_id: &str) -> Result<Segment, BackendError>;
}

/// Lookup access to backend type definitions.
#[async_trait]
pub trait DefinitionsService: Send + Sync {
    /// Returns the condition type descriptor registered under `name`, or
    /// `None` if no such type exists.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing
    /// definitions.
    async fn get_condition_type(
        &self,
        name: &str,
    ) -> Result<Option<ConditionType>, BackendError>;
}
