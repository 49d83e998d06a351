//! Declarative request validation.
//!
//! A request shape is an ordered list of named [`FieldSpec`]s declared as a
//! `const` slice. Validation walks the shape in declaration order, applies
//! each field's required/nullable policy and parse rule, and accumulates
//! every violation into a single [`ValidationError`]: a request with three
//! bad fields reports all three, not just the first.
//!
//! # Example
//!
//! ```
//! use scoring_api::schema::{validate, FieldRule, FieldSpec};
//! use serde_json::json;
//!
//! const SHAPE: &[FieldSpec] = &[
//!     FieldSpec {
//!         name: "login",
//!         required: true,
//!         nullable: true,
//!         rule: FieldRule::Text,
//!     },
//! ];
//!
//! let raw = json!({"login": "h&f", "ignored": 1});
//! let fields = validate(SHAPE, raw.as_object().unwrap()).unwrap();
//! assert_eq!(fields.text("login"), Some("h&f"));
//! ```

mod rules;

pub use rules::{FieldRule, FieldValue, GENDERS, GENDER_FEMALE, GENDER_MALE, GENDER_UNKNOWN};

use std::collections::HashMap;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::error::ValidationError;

// =============================================================================
// Field Specification
// =============================================================================

/// A stateless description of how one named input value is validated.
///
/// Specs are shared across request instances; they describe validation and
/// never store a value themselves.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// The key this field is read from in the raw input object
    pub name: &'static str,

    /// Whether the key must be present in the input at all
    pub required: bool,

    /// Whether a present-but-falsy value (null, false, 0, "", [], {}) is
    /// acceptable; when it is, the parse rule is skipped and the value is
    /// kept as-is
    pub nullable: bool,

    /// The parse-and-validate rule applied to non-falsy values
    pub rule: FieldRule,
}

// =============================================================================
// Validated Instance
// =============================================================================

/// The parsed fields of one request instance.
///
/// Built fresh from an untyped input object for every call; keys not in the
/// shape are ignored, keys missing from the input stay unset.
#[derive(Debug, Default)]
pub struct FieldMap {
    values: HashMap<&'static str, FieldValue>,
}

impl FieldMap {
    /// The parsed value of a field, if it was supplied.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Whether the field was supplied at all (including falsy accepted
    /// values, excluding JSON null).
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Text content of a field. Falsy-accepted empty strings are visible
    /// here; other kinds are not.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            FieldValue::Text(s) => Some(s),
            FieldValue::Empty(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Object content of a field (method arguments).
    pub fn arguments(&self, name: &str) -> Option<&Map<String, Value>> {
        match self.values.get(name)? {
            FieldValue::Arguments(map) => Some(map),
            FieldValue::Empty(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// Parsed date content of a field.
    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        match self.values.get(name)? {
            FieldValue::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// Integer content of a field (gender codes).
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.values.get(name)? {
            FieldValue::Int(code) => Some(*code),
            _ => None,
        }
    }

    /// Client id list content of a field.
    pub fn client_ids(&self, name: &str) -> Option<&[i64]> {
        match self.values.get(name)? {
            FieldValue::ClientIds(ids) => Some(ids),
            _ => None,
        }
    }
}

// =============================================================================
// Validation Driver
// =============================================================================

/// Validate a raw input object against a shape.
///
/// Fields are processed in shape order and every violation is accumulated;
/// the result is either a fully parsed [`FieldMap`] or a single
/// [`ValidationError`] listing all of them.
pub fn validate(shape: &[FieldSpec], raw: &Map<String, Value>) -> Result<FieldMap, ValidationError> {
    let mut values = HashMap::with_capacity(shape.len());
    let mut errors = Vec::new();

    for spec in shape {
        let Some(value) = raw.get(spec.name) else {
            if spec.required {
                errors.push(format!("required field `{}` is missing", spec.name));
            }
            continue;
        };

        if is_empty_value(value) {
            if !spec.nullable {
                errors.push(format!(
                    "non-nullable field `{}` is empty ({})",
                    spec.name, value
                ));
            } else if !value.is_null() {
                // Accepted as-is; null stays unset.
                values.insert(spec.name, FieldValue::Empty(value.clone()));
            }
            continue;
        }

        match spec.rule.parse_validate(value) {
            Ok(parsed) => {
                values.insert(spec.name, parsed);
            }
            Err(reason) => {
                errors.push(format!(
                    "field `{}` is invalid: {} ({})",
                    spec.name, reason, value
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(FieldMap { values })
    } else {
        Err(ValidationError::new(errors))
    }
}

/// The JSON values treated as "empty" by the nullable policy.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

// =============================================================================
// Tests
// =============================================================================
