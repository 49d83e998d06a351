//! Parse-and-validate rules for individual request fields.
//!
//! Each rule takes the raw JSON value supplied by the caller and either
//! produces a typed [`FieldValue`] or fails with a reason string. Rules are
//! stateless; the required/nullable policy around them lives in
//! [`crate::schema::validate`].
//!
//! Refined rules ([`FieldRule::Email`], [`FieldRule::Birthday`]) delegate to
//! their base rule first and then apply the extra check.

use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use serde_json::{Map, Value};

/// Gender code for "unknown".
pub const GENDER_UNKNOWN: i64 = 0;

/// Gender code for "male".
pub const GENDER_MALE: i64 = 1;

/// Gender code for "female".
pub const GENDER_FEMALE: i64 = 2;

/// The accepted gender codes, in ascending order.
pub const GENDERS: [i64; 3] = [GENDER_UNKNOWN, GENDER_MALE, GENDER_FEMALE];

// =============================================================================
// Parsed Values
// =============================================================================

/// A field value after successful validation.
///
/// Raw JSON values are replaced by their parsed form during validation; this
/// enum is the closed set of forms a field can take.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A plain string (also the parsed form of a normalized phone number)
    Text(String),

    /// A JSON object holding opaque method arguments
    Arguments(Map<String, Value>),

    /// A calendar date
    Date(NaiveDate),

    /// A small integer code (gender)
    Int(i64),

    /// A list of integer client ids
    ClientIds(Vec<i64>),

    /// A falsy value accepted as-is on a nullable field, kept so the field
    /// still counts as supplied
    Empty(Value),
}

// =============================================================================
// Rules
// =============================================================================

/// The closed set of field validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Any JSON string
    Text,

    /// A JSON object (opaque arguments for the dispatched method)
    Arguments,

    /// A string containing `@`
    Email,

    /// An integer or string of exactly 11 digits starting with `7`;
    /// integers are normalized to their decimal string
    Phone,

    /// A `d.m.yyyy` date, zero-padding optional
    Date,

    /// A date strictly in the past and at most 70 calendar years ago
    Birthday,

    /// One of the integer codes in [`GENDERS`]
    Gender,

    /// A list whose elements are all integers
    ClientIds,
}

impl FieldRule {
    /// Validate a raw value and produce its parsed form.
    ///
    /// On failure the returned string describes the violation; the caller
    /// prefixes it with the field name when accumulating errors.
    pub fn parse_validate(&self, value: &Value) -> Result<FieldValue, String> {
        match self {
            FieldRule::Text => match value.as_str() {
                Some(s) => Ok(FieldValue::Text(s.to_string())),
                None => Err("not a string".to_string()),
            },

            FieldRule::Arguments => match value.as_object() {
                Some(map) => Ok(FieldValue::Arguments(map.clone())),
                None => Err("not an object".to_string()),
            },

            FieldRule::Email => {
                let FieldValue::Text(s) = FieldRule::Text.parse_validate(value)? else {
                    unreachable!("Text rule only produces Text values");
                };
                if !s.contains('@') {
                    return Err("email must contain `@`".to_string());
                }
                Ok(FieldValue::Text(s))
            }

            FieldRule::Phone => {
                let digits = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => match n.as_i64() {
                        Some(i) => i.to_string(),
                        None => return Err("either an integer or a string allowed".to_string()),
                    },
                    _ => return Err("either an integer or a string allowed".to_string()),
                };
                if !is_valid_phone(&digits) {
                    return Err("phone must be 11 digits long and start with `7`".to_string());
                }
                Ok(FieldValue::Text(digits))
            }

            FieldRule::Date => {
                let s = value.as_str().ok_or_else(|| "not a valid date".to_string())?;
                match parse_date(s) {
                    Some(date) => Ok(FieldValue::Date(date)),
                    None => Err("not a valid date".to_string()),
                }
            }

            FieldRule::Birthday => {
                let FieldValue::Date(date) = FieldRule::Date.parse_validate(value)? else {
                    unreachable!("Date rule only produces Date values");
                };
                let now = Local::now().naive_local();
                let midnight = date.and_time(NaiveTime::MIN);
                if !(midnight < now && now.year() <= date.year() + 70) {
                    return Err("valid age is between 0 and 70 years".to_string());
                }
                Ok(FieldValue::Date(date))
            }

            FieldRule::Gender => match value.as_i64() {
                Some(code) if GENDERS.contains(&code) => Ok(FieldValue::Int(code)),
                _ => Err(format!("gender must be one of {:?}", GENDERS)),
            },

            FieldRule::ClientIds => {
                let items = value
                    .as_array()
                    .ok_or_else(|| "client ids must be a list of integers".to_string())?;
                let mut ids = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_i64() {
                        Some(id) => ids.push(id),
                        None => return Err("client ids must be a list of integers".to_string()),
                    }
                }
                Ok(FieldValue::ClientIds(ids))
            }
        }
    }
}

/// Check the `7` + 10 digits phone pattern.
fn is_valid_phone(s: &str) -> bool {
    s.len() == 11 && s.starts_with('7') && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a `d.m.yyyy` date.
///
/// Day and month may be one or two digits; the year must be exactly four.
/// The result is calendar-validated (no 30th of February).
fn parse_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.splitn(3, '.');
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;

    if !(1..=2).contains(&day.len()) || !(1..=2).contains(&month.len()) || year.len() != 4 {
        return None;
    }

    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

// =============================================================================
// Tests
// =============================================================================
