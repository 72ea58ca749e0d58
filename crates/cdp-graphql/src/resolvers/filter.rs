//! Filter input to backend condition translation.
//!
//! The public filter grammar is not finalized, so every filter currently
//! translates to the backend's match-all condition: searches return the
//! full result set regardless of the filter argument. The condition type
//! descriptor is still looked up through the definitions service, so a
//! backend that lacks it fails loudly instead of silently matching nothing.

use cdp_backend::{BackendError, Condition, DynDefinitionsService, MATCH_ALL_CONDITION};
use serde_json::Value;
use tracing::debug;

/// Translates GraphQL filter inputs into backend search conditions.
pub struct ConditionTranslator;

impl ConditionTranslator {
    /// Builds the backend condition for a connection field's filter argument.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::UnknownConditionType` when the backend does
    /// not define the match-all condition type, and propagates definitions
    /// service failures.
    pub async fn translate(
        filter: Option<&Value>,
        definitions: &DynDefinitionsService,
    ) -> Result<Condition, BackendError> {
        if filter.is_some_and(|f| !f.is_null()) {
            debug!("filter argument present; grammar not finalized, matching all");
        }

        let condition_type = definitions
            .get_condition_type(MATCH_ALL_CONDITION)
            .await?
            .ok_or_else(|| BackendError::unknown_condition_type(MATCH_ALL_CONDITION))?;

        Ok(Condition::new(&condition_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cdp_backend::{ConditionType, DefinitionsService};
    use std::sync::Arc;

    struct FixedDefinitions {
        known: bool,
    }

    #[async_trait]
    impl DefinitionsService for FixedDefinitions {
        async fn get_condition_type(
            &self,
            name: &str,
        ) -> Result<Option<ConditionType>, BackendError> {
            if self.known && name == MATCH_ALL_CONDITION {
                Ok(Some(ConditionType::new(MATCH_ALL_CONDITION)))
            } else {
                Ok(None)
            }
        }
    }

    #[tokio::test]
    async fn test_any_filter_translates_to_match_all() {
        let definitions: DynDefinitionsService = Arc::new(FixedDefinitions { known: true });

        let condition = ConditionTranslator::translate(None, &definitions).await.unwrap();
        assert_eq!(condition.condition_type_id, MATCH_ALL_CONDITION);

        let filter = serde_json::json!({ "id_equals": "e1" });
        let condition = ConditionTranslator::translate(Some(&filter), &definitions)
            .await
            .unwrap();
        assert_eq!(condition.condition_type_id, MATCH_ALL_CONDITION);
    }

    #[tokio::test]
    async fn test_missing_descriptor_is_unknown_condition_type() {
        let definitions: DynDefinitionsService = Arc::new(FixedDefinitions { known: false });

        let err = ConditionTranslator::translate(None, &definitions).await.unwrap_err();
        assert!(matches!(err, BackendError::UnknownConditionType { .. }));
    }
}
