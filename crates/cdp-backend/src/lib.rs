//! # cdp-backend
//!
//! Backend collaborator abstraction for the CDP GraphQL bridge.
//!
//! This crate defines the traits and types the bridge's resolvers call into.
//! It does not contain any backend implementation - those are provided by
//! separate crates (or by test doubles in the bridge's test suite).
//!
//! ## Overview
//!
//! The collaborators are:
//! - [`EventService`] - paged search over tracked events
//! - [`SegmentService`] - paged search over segment metadata plus full
//!   segment definition lookup
//! - [`DefinitionsService`] - condition type descriptor lookup
//!
//! Search predicates are expressed as backend-native [`Condition`] trees,
//! constructed from [`ConditionType`] descriptors. Paged results come back
//! as [`PartialList`] values carrying the total match count.
//!
//! ## Example
//!
//! ```ignore
//! use cdp_backend::{Condition, ConditionType, EventService, MATCH_ALL_CONDITION};
//!
//! async fn first_page(events: &dyn EventService) -> Result<u64, cdp_backend::BackendError> {
//!     let condition = Condition::new(&ConditionType::new(MATCH_ALL_CONDITION));
//!     let page = events.search_events(&condition, 0, 10).await?;
//!     Ok(page.total_size)
//! }
//! ```

mod condition;
mod error;
mod traits;
mod types;

pub use condition::{Condition, ConditionType, MATCH_ALL_CONDITION};
pub use error::BackendError;
pub use traits::{DefinitionsService, EventService, SegmentService};
pub use types::{Event, PartialList, Segment, SegmentSummary};

/// Type alias for a backend result.
pub type BackendResult<T> = Result<T, BackendError>;

/// Type alias for a shared event service trait object.
pub type DynEventService = std::sync::Arc<dyn EventService>;

/// Type alias for a shared segment service trait object.
pub type DynSegmentService = std::sync::Arc<dyn SegmentService>;

/// Type alias for a shared definitions service trait object.
pub type DynDefinitionsService = std::sync::Arc<dyn DefinitionsService>;
