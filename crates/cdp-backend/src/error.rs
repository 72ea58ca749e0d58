//! Backend error types for the CDP collaborator abstraction.
//!
//! This module defines all error types that can occur when calling the
//! event-tracking and segmentation backend.

/// Errors that can occur during backend operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// A condition type name is not registered with the backend.
    #[error("Unknown condition type: {name}")]
    UnknownConditionType {
        /// The condition type name that was requested.
        name: String,
    },

    /// The requested segment was not found.
    #[error("Segment not found: {segment_id}")]
    SegmentNotFound {
        /// The ID of the segment that was not found.
        segment_id: String,
    },

    /// A search query was rejected by the backend.
    #[error("Invalid query: {message}")]
    InvalidQuery {
        /// Description of why the query is invalid.
        message: String,
    },

    /// Failed to reach the backend.
    #[error("Connection error: {message}")]
    ConnectionError {
        /// Description of the connection error.
        message: String,
    },

    /// An internal backend error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl BackendError {
    /// Creates a new `UnknownConditionType` error.
    #[must_use]
    pub fn unknown_condition_type(name: impl Into<String>) -> Self {
        Self::UnknownConditionType { name: name.into() }
    }

    /// Creates a new `SegmentNotFound` error.
    #[must_use]
    pub fn segment_not_found(segment_id: impl Into<String>) -> Self {
        Self::SegmentNotFound {
            segment_id: segment_id.into(),
        }
    }

    /// Creates a new `InvalidQuery` error.
    #[must_use]
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// Creates a new `ConnectionError` error.
    #[must_use]
    pub fn connection_error(message: impl Into<String>) -> Self {
        Self::ConnectionError {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
