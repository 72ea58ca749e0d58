//! Backend condition trees.
//!
//! A [`Condition`] is the backend-native representation of a search/filter
//! predicate. The bridge constructs conditions from descriptors obtained
//! through the definitions service and hands them to search calls; it never
//! inspects a condition after construction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the condition type that matches every item.
pub const MATCH_ALL_CONDITION: &str = "matchAllCondition";

/// Descriptor for a registered condition type.
///
/// Condition types are defined by the backend; the bridge only looks them up
/// by name to build conditions with the right type ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionType {
    /// The condition type identifier.
    pub id: String,
    /// Human-readable description of what the condition matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ConditionType {
    /// Creates a new `ConditionType`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A backend search condition.
///
/// Conditions form a tree: composite condition types reference child
/// conditions through their parameter values. Ownership passes to the
/// backend once a condition is used in a search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    /// The ID of the condition type this condition instantiates.
    #[serde(rename = "type")]
    pub condition_type_id: String,
    /// Parameter values keyed by the condition type's parameter names.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub parameter_values: HashMap<String, Value>,
}

impl Condition {
    /// Creates a new condition of the given type with no parameters.
    #[must_use]
    pub fn new(condition_type: &ConditionType) -> Self {
        Self {
            condition_type_id: condition_type.id.clone(),
            parameter_values: HashMap::new(),
        }
    }

    /// Sets a parameter value.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parameter_values.insert(name.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_condition_from_type() {
        let ctype = ConditionType::new(MATCH_ALL_CONDITION)
            .with_description("Matches every item");
        let condition = Condition::new(&ctype);

        assert_eq!(condition.condition_type_id, "matchAllCondition");
        assert!(condition.parameter_values.is_empty());
    }

    #[test]
    fn test_condition_parameters() {
        let ctype = ConditionType::new("eventTypeCondition");
        let condition = Condition::new(&ctype).with_parameter("eventTypeId", json!("view"));

        assert_eq!(
            condition.parameter_values.get("eventTypeId"),
            Some(&json!("view"))
        );
    }

    #[test]
    fn test_condition_serializes_type_id() {
        let condition = Condition::new(&ConditionType::new(MATCH_ALL_CONDITION));
        let json = serde_json::to_value(&condition).unwrap();
        assert_eq!(json["type"], "matchAllCondition");
    }
}
