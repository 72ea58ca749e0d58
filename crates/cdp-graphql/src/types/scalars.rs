//! Scalar coercions for the dynamic schema.
//!
//! A [`ScalarCoercion`] carries the three functions a scalar needs:
//! serialize-for-output, parse-input-value, and parse-literal-value.
//! Serialize is applied by the generated field resolvers when projecting a
//! scalar-typed field; the parse functions back the dynamic scalar's input
//! validator.
//!
//! Two kinds of scalars exist here:
//! - real scalars (`Date`, `DateTime`, `Time`, `JSON`) with format-validating
//!   parse functions, and
//! - pass-through workaround scalars (`EmptyTypeWorkAround`, `GeoPoint`)
//!   whose serialize always yields null and whose parse functions are
//!   identity on the already-decoded input. They exist because the schema
//!   language forbids types with zero fields, and must never surface data.

use std::sync::Arc;

use async_graphql::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

/// Serializes a resolved value for output.
pub type SerializeFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Parses an input or literal value, rejecting malformed input.
pub type ParseFn = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;

/// A named scalar coercion.
#[derive(Clone)]
pub struct ScalarCoercion {
    /// The scalar's type name as it appears in the schema documents.
    pub name: String,
    serialize: SerializeFn,
    parse_value: ParseFn,
    parse_literal: ParseFn,
}

impl ScalarCoercion {
    /// Creates a coercion with explicit functions.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        serialize: SerializeFn,
        parse_value: ParseFn,
        parse_literal: ParseFn,
    ) -> Self {
        Self {
            name: name.into(),
            serialize,
            parse_value,
            parse_literal,
        }
    }

    /// Creates a pass-through workaround coercion: serialize always yields
    /// `Null`, parse functions are identity.
    #[must_use]
    pub fn pass_through(name: impl Into<String>) -> Self {
        let identity: ParseFn = Arc::new(|v: &Value| Ok(v.clone()));
        Self {
            name: name.into(),
            serialize: Arc::new(|_| Value::Null),
            parse_value: identity.clone(),
            parse_literal: identity,
        }
    }

    /// Serializes a resolved value for output.
    #[must_use]
    pub fn serialize(&self, value: &Value) -> Value {
        (self.serialize)(value)
    }

    /// Parses an already-decoded input value.
    ///
    /// # Errors
    ///
    /// Returns a description of the format violation.
    pub fn parse_value(&self, value: &Value) -> Result<Value, String> {
        (self.parse_value)(value)
    }

    /// Parses a literal value from the query document.
    ///
    /// # Errors
    ///
    /// Returns a description of the format violation.
    pub fn parse_literal(&self, value: &Value) -> Result<Value, String> {
        (self.parse_literal)(value)
    }
}

/// Builds a string-format coercion: serialize is identity, parse functions
/// require a string accepted by `check`.
fn string_format(
    name: &str,
    expected: &'static str,
    check: impl Fn(&str) -> bool + Send + Sync + Clone + 'static,
) -> ScalarCoercion {
    let parse: ParseFn = Arc::new(move |v: &Value| match v {
        Value::String(s) if check(s) => Ok(v.clone()),
        Value::String(s) => Err(format!("invalid {expected}: '{s}'")),
        other => Err(format!("expected a {expected} string, got {other}")),
    });
    ScalarCoercion::new(name, Arc::new(|v: &Value| v.clone()), parse.clone(), parse)
}

/// The standard coercions for the real scalars declared by the CDP schema
/// document: `Date`, `DateTime`, `Time`, and `JSON`.
#[must_use]
pub fn standard_coercions() -> Vec<ScalarCoercion> {
    let date_format = format_description!("[year]-[month]-[day]");
    let time_format = format_description!("[hour]:[minute]:[second]");

    let identity: ParseFn = Arc::new(|v: &Value| Ok(v.clone()));

    vec![
        string_format("Date", "ISO-8601 date", move |s| {
            time::Date::parse(s, &date_format).is_ok()
        }),
        string_format("DateTime", "RFC 3339 date-time", |s| {
            time::OffsetDateTime::parse(s, &Rfc3339).is_ok()
        }),
        string_format("Time", "time of day", move |s| {
            time::Time::parse(s, &time_format).is_ok()
        }),
        // JSON accepts and emits any value unchanged.
        ScalarCoercion::new(
            "JSON",
            Arc::new(|v: &Value| v.clone()),
            identity.clone(),
            identity,
        ),
    ]
}

/// The pass-through workaround coercions required by the CDP schema
/// document: `EmptyTypeWorkAround` and `GeoPoint`.
#[must_use]
pub fn workaround_coercions() -> Vec<ScalarCoercion> {
    vec![
        ScalarCoercion::pass_through("EmptyTypeWorkAround"),
        ScalarCoercion::pass_through("GeoPoint"),
    ]
}
