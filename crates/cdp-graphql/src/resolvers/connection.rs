//! Cursor pagination shared by the connection fields.
//!
//! Cursor contract: an incoming `after` cursor is a base-10 offset encoded
//! as a string, interpreted exclusively (results start at `offset`). A
//! malformed cursor is a pagination error on the field, never a silent
//! default. Outgoing edge cursors carry the item's identifier.

use std::future::Future;

use async_graphql::{Error, Name, Value, indexmap::IndexMap};

use crate::error::GraphQLError;

/// One fetched page: `(cursor, node)` edges plus the backend's total count
/// of matching items.
#[derive(Debug, Clone)]
pub struct ConnectionPage {
    /// Edges in backend order; the cursor is the item identifier.
    pub edges: Vec<(String, Value)>,
    /// Total number of matching items, independent of the page window.
    pub total: u64,
}

/// Resolves the `first`/`after` pair into an offset window, runs `fetch`,
/// and shapes the result as a connection value with `edges` and `pageInfo`.
///
/// `hasNextPage` is true when the backend's total exceeds the window end.
/// `hasPreviousPage` is always false: backwards paging is not offered.
///
/// # Errors
///
/// Returns a field error when `first` is not positive, when `after` is not
/// a base-10 offset, or when `fetch` fails.
pub async fn paginate<F, Fut>(
    first: Option<i64>,
    after: Option<&str>,
    default_first: u64,
    fetch: F,
) -> Result<Value, Error>
where
    F: FnOnce(u64, u64) -> Fut,
    Fut: Future<Output = Result<ConnectionPage, Error>>,
{
    let limit = match first {
        None => default_first,
        Some(n) if n >= 1 => n as u64,
        Some(n) => {
            return Err(Error::new(
                GraphQLError::Pagination(format!("`first` must be positive, got {n}")).to_string(),
            ));
        }
    };

    let offset = match after {
        None => 0,
        Some(cursor) => cursor.parse::<u64>().map_err(|_| {
            Error::new(
                GraphQLError::Pagination(format!("malformed cursor `{cursor}`")).to_string(),
            )
        })?,
    };

    let page = fetch(offset, limit).await?;
    let returned = page.edges.len() as u64;

    let edges: Vec<Value> = page
        .edges
        .into_iter()
        .map(|(cursor, node)| {
            let mut edge = IndexMap::new();
            edge.insert(Name::new("node"), node);
            edge.insert(Name::new("cursor"), Value::String(cursor));
            Value::Object(edge)
        })
        .collect();

    let mut page_info = IndexMap::new();
    page_info.insert(Name::new("hasPreviousPage"), Value::Boolean(false));
    page_info.insert(
        Name::new("hasNextPage"),
        Value::Boolean(page.total > offset.saturating_add(returned)),
    );

    let mut connection = IndexMap::new();
    connection.insert(Name::new("edges"), Value::List(edges));
    connection.insert(Name::new("pageInfo"), Value::Object(page_info));
    Ok(Value::Object(connection))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(ids: &[&str], total: u64) -> ConnectionPage {
        ConnectionPage {
            edges: ids
                .iter()
                .map(|id| ((*id).to_string(), Value::String((*id).into())))
                .collect(),
            total,
        }
    }

    fn page_info(connection: &Value) -> (bool, bool) {
        let Value::Object(obj) = connection else {
            panic!("expected object");
        };
        let Some(Value::Object(info)) = obj.get("pageInfo") else {
            panic!("missing pageInfo");
        };
        let Some(Value::Boolean(prev)) = info.get("hasPreviousPage") else {
            panic!("missing hasPreviousPage");
        };
        let Some(Value::Boolean(next)) = info.get("hasNextPage") else {
            panic!("missing hasNextPage");
        };
        (*prev, *next)
    }

    fn cursors(connection: &Value) -> Vec<String> {
        let Value::Object(obj) = connection else {
            panic!("expected object");
        };
        let Some(Value::List(edges)) = obj.get("edges") else {
            panic!("missing edges");
        };
        edges
            .iter()
            .map(|edge| {
                let Value::Object(edge) = edge else {
                    panic!("edge not an object");
                };
                let Some(Value::String(cursor)) = edge.get("cursor") else {
                    panic!("missing cursor");
                };
                cursor.clone()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_defaults_apply_when_arguments_absent() {
        let connection = paginate(None, None, 10, |offset, limit| async move {
            assert_eq!(offset, 0);
            assert_eq!(limit, 10);
            Ok(page(&["a"], 1))
        })
        .await
        .unwrap();
        assert_eq!(page_info(&connection), (false, false));
    }

    #[tokio::test]
    async fn test_next_page_detection() {
        // total 5, window [0, 2): items remain past the window.
        let connection = paginate(Some(2), None, 10, |_, _| async move {
            Ok(page(&["e1", "e2"], 5))
        })
        .await
        .unwrap();
        assert_eq!(page_info(&connection), (false, true));
        assert_eq!(cursors(&connection), vec!["e1", "e2"]);
    }

    #[tokio::test]
    async fn test_window_past_end_has_no_next_page() {
        // total 5, offset 3, 2 returned: 3 + 2 == 5.
        let connection = paginate(Some(10), Some("3"), 10, |offset, limit| async move {
            assert_eq!(offset, 3);
            assert_eq!(limit, 10);
            Ok(page(&["e4", "e5"], 5))
        })
        .await
        .unwrap();
        assert_eq!(page_info(&connection), (false, false));
    }

    #[tokio::test]
    async fn test_previous_page_never_reported() {
        let connection = paginate(Some(1), Some("4"), 10, |_, _| async move {
            Ok(page(&["e5"], 5))
        })
        .await
        .unwrap();
        let (prev, _) = page_info(&connection);
        assert!(!prev);
    }

    #[tokio::test]
    async fn test_malformed_cursor_is_an_error_before_fetch() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let fetched = AtomicBool::new(false);
        let result = paginate(Some(1), Some("not-a-number"), 10, |_, _| {
            fetched.store(true, Ordering::SeqCst);
            async move { Ok(page(&[], 0)) }
        })
        .await;

        let err = result.unwrap_err();
        assert!(err.message.contains("not-a-number"));
        assert!(!fetched.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_non_positive_first_is_an_error() {
        let result = paginate(Some(0), None, 10, |_, _| async move { Ok(page(&[], 0)) }).await;
        assert!(result.is_err());

        let result = paginate(Some(-3), None, 10, |_, _| async move { Ok(page(&[], 0)) }).await;
        assert!(result.unwrap_err().message.contains("-3"));
    }

    #[tokio::test]
    async fn test_window_end_saturates_at_maximum_offset() {
        // An offset of u64::MAX plus returned items must not wrap; the
        // window end clamps and no next page is reported.
        let cursor = u64::MAX.to_string();
        let connection = paginate(Some(1), Some(cursor.as_str()), 10, |offset, _| async move {
            assert_eq!(offset, u64::MAX);
            Ok(page(&["e1"], 5))
        })
        .await
        .unwrap();
        assert_eq!(page_info(&connection), (false, false));
    }

    #[tokio::test]
    async fn test_empty_result_set() {
        let connection =
            paginate(None, None, 10, |_, _| async move { Ok(page(&[], 0)) }).await.unwrap();
        assert_eq!(cursors(&connection).len(), 0);
        assert_eq!(page_info(&connection), (false, false));
    }
}
