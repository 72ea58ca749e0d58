//! Data types exchanged with the backend collaborators.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// A page of results from a backend search, together with the total count
/// of matches beyond the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialList<T> {
    /// The items on this page, in backend order.
    pub list: Vec<T>,
    /// Zero-based offset of the first item in the full result set.
    pub offset: u64,
    /// The page size that was requested.
    pub page_size: u64,
    /// Total number of matching items in the full result set.
    pub total_size: u64,
}

impl<T> PartialList<T> {
    /// Creates a new `PartialList`.
    #[must_use]
    pub fn new(list: Vec<T>, offset: u64, page_size: u64, total_size: u64) -> Self {
        Self {
            list,
            offset,
            page_size,
            total_size,
        }
    }

    /// Creates an empty list with a zero total.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            list: Vec::new(),
            offset: 0,
            page_size: 0,
            total_size: 0,
        }
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

/// A tracked event as returned by the event search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// The event's stable item identifier.
    pub item_id: String,
    /// The backend event type (e.g. "view", "sessionCreated").
    pub event_type: String,
    /// The ID of the profile the event belongs to.
    pub profile_id: String,
    /// The scope the event was collected in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// When the event occurred.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Event-type-specific payload.
    #[serde(default)]
    pub properties: Value,
}

impl Event {
    /// Creates a new `Event` with an empty payload, timestamped now.
    #[must_use]
    pub fn new(
        item_id: impl Into<String>,
        event_type: impl Into<String>,
        profile_id: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            event_type: event_type.into(),
            profile_id: profile_id.into(),
            scope: None,
            timestamp: OffsetDateTime::now_utc(),
            properties: Value::Null,
        }
    }

    /// Sets the scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Sets the payload.
    #[must_use]
    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = properties;
        self
    }
}

/// Lightweight segment metadata as returned by the segment search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentSummary {
    /// The segment identifier.
    pub id: String,
    /// Display name of the segment.
    pub name: String,
    /// The scope the segment is defined in.
    pub scope: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SegmentSummary {
    /// Creates a new `SegmentSummary`.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scope: scope.into(),
            description: None,
        }
    }
}

/// A full segment definition: metadata plus the membership condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// The segment's metadata.
    pub summary: SegmentSummary,
    /// The condition tree deciding segment membership.
    pub condition: crate::condition::Condition,
}

impl Segment {
    /// Creates a new `Segment`.
    #[must_use]
    pub fn new(summary: SegmentSummary, condition: crate::condition::Condition) -> Self {
        Self { summary, condition }
    }
}
