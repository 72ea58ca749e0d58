//! Segment search resolver.
//!
//! Resolves `findSegments(filter, first, after)`: a windowed search over
//! segment metadata, with each node enriched by the segment's full
//! definition so the membership condition can be summarized as a profile
//! filter. A segment that disappears between the search and the definition
//! lookup degrades to a node without a profile filter instead of failing
//! the whole connection.

use async_graphql::dynamic::{FieldFuture, ResolverContext};
use async_graphql::{Error, Name, Value, indexmap::IndexMap};
use cdp_backend::{Condition, SegmentSummary};
use tracing::{debug, warn};

use super::{
    ConditionTranslator, ConnectionPage, get_graphql_context, json_to_graphql_value, paginate,
    value_accessor_to_json,
};

/// Condition parameter carrying explicit profile identifiers.
const PROFILE_IDS_PARAMETER: &str = "profileIds";

/// Resolver for the segment connection field.
pub struct SegmentSearchResolver;

impl SegmentSearchResolver {
    /// Creates the resolver function for `findSegments`.
    pub fn resolve() -> impl for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync + Clone
    {
        |ctx| {
            FieldFuture::new(async move {
                debug!("resolving segment search");

                let gql_ctx = get_graphql_context(&ctx)?;

                let first = ctx
                    .args
                    .get("first")
                    .filter(|v| !v.is_null())
                    .map(|v| v.i64())
                    .transpose()?;
                let after = ctx
                    .args
                    .get("after")
                    .filter(|v| !v.is_null())
                    .map(|v| v.string().map(str::to_string))
                    .transpose()?;
                let filter = ctx
                    .args
                    .get("filter")
                    .filter(|v| !v.is_null())
                    .map(|v| value_accessor_to_json(&v))
                    .transpose()?;

                let condition =
                    ConditionTranslator::translate(filter.as_ref(), &gql_ctx.definitions)
                        .await
                        .map_err(|e| {
                            warn!(error = %e, "filter translation failed");
                            Error::new(e.to_string())
                        })?;

                let connection = paginate(
                    first,
                    after.as_deref(),
                    gql_ctx.default_page_size,
                    |offset, limit| {
                        let segments = gql_ctx.segments.clone();
                        let condition = condition.clone();
                        async move {
                            let page = segments
                                .search_segment_metadata(&condition, limit, offset)
                                .await
                                .map_err(|e| {
                                    warn!(error = %e, "segment search failed");
                                    Error::new(e.to_string())
                                })?;

                            debug!(
                                returned = page.len(),
                                total = page.total_size,
                                "segment search completed"
                            );

                            let total = page.total_size;
                            let mut edges = Vec::with_capacity(page.len());
                            for summary in page.list {
                                let profiles =
                                    match segments.get_segment_definition(&summary.id).await {
                                        Ok(segment) => {
                                            summarize_profile_filter(&segment.condition)
                                        }
                                        Err(e) => {
                                            warn!(
                                                segment_id = %summary.id,
                                                error = %e,
                                                "segment definition unavailable"
                                            );
                                            Value::Null
                                        }
                                    };
                                edges.push((summary.id.clone(), segment_node(summary, profiles)));
                            }
                            Ok(ConnectionPage { edges, total })
                        }
                    },
                )
                .await?;

                Ok(Some(connection))
            })
        }
    }
}

/// Shapes one segment as a node value.
fn segment_node(summary: SegmentSummary, profiles: Value) -> Value {
    let mut view = IndexMap::new();
    view.insert(Name::new("name"), Value::String(summary.scope));

    let mut node = IndexMap::new();
    node.insert(Name::new("id"), Value::String(summary.id));
    node.insert(Name::new("name"), Value::String(summary.name));
    node.insert(Name::new("view"), Value::Object(view));
    node.insert(Name::new("profiles"), profiles);
    Value::Object(node)
}

/// Summarizes a membership condition as a profile filter value.
///
/// The baseline summary is an empty filter. A condition carrying an explicit
/// `profileIds` list additionally projects it into `profileIDs`; the filter
/// grammar is not finalized upstream, so this projection is provisional and
/// tracks the grammar rather than defining it.
fn summarize_profile_filter(condition: &Condition) -> Value {
    let mut filter = IndexMap::new();

    if let Some(serde_json::Value::Array(ids)) =
        condition.parameter_values.get(PROFILE_IDS_PARAMETER)
    {
        let ids: Vec<Value> = ids
            .iter()
            .map(|id| json_to_graphql_value(id.clone()))
            .collect();
        filter.insert(Name::new("profileIDs"), Value::List(ids));
    }

    Value::Object(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdp_backend::ConditionType;
    use serde_json::json;

    #[test]
    fn test_node_shape() {
        let summary = SegmentSummary::new("seg-1", "High value", "web");
        let Value::Object(node) = segment_node(summary, Value::Object(IndexMap::new())) else {
            panic!("expected object");
        };

        assert_eq!(node.get("id"), Some(&Value::String("seg-1".into())));
        assert_eq!(node.get("name"), Some(&Value::String("High value".into())));

        let Some(Value::Object(view)) = node.get("view") else {
            panic!("missing view");
        };
        assert_eq!(view.get("name"), Some(&Value::String("web".into())));
    }

    #[test]
    fn test_profile_filter_with_explicit_ids() {
        let condition_type = ConditionType::new("profileIdCondition");
        let condition = Condition::new(&condition_type)
            .with_parameter(PROFILE_IDS_PARAMETER, json!(["p1", "p2"]));

        let Value::Object(filter) = summarize_profile_filter(&condition) else {
            panic!("expected object");
        };
        assert_eq!(
            filter.get("profileIDs"),
            Some(&Value::List(vec![
                Value::String("p1".into()),
                Value::String("p2".into())
            ]))
        );
    }

    #[test]
    fn test_profile_filter_defaults_to_empty() {
        let condition_type = ConditionType::new(cdp_backend::MATCH_ALL_CONDITION);
        let condition = Condition::new(&condition_type);

        let Value::Object(filter) = summarize_profile_filter(&condition) else {
            panic!("expected object");
        };
        assert!(filter.is_empty());
    }
}
