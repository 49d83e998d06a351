//! The `online_score` method: argument shape and handler.

use serde_json::{Map, Value};

use crate::error::{MethodError, ValidationError};
use crate::schema::{validate, FieldRule, FieldSpec};
use crate::scoring;
use crate::store::Store;

use super::Context;

/// Registered name of this method.
pub const METHOD_NAME: &str = "online_score";

/// The constant score returned to an authenticated admin, bypassing the
/// scoring logic entirely.
pub const ADMIN_SCORE: i64 = 42;

const SHAPE: &[FieldSpec] = &[
    FieldSpec {
        name: "first_name",
        required: false,
        nullable: true,
        rule: FieldRule::Text,
    },
    FieldSpec {
        name: "last_name",
        required: false,
        nullable: true,
        rule: FieldRule::Text,
    },
    FieldSpec {
        name: "email",
        required: false,
        nullable: true,
        rule: FieldRule::Email,
    },
    FieldSpec {
        name: "phone",
        required: false,
        nullable: true,
        rule: FieldRule::Phone,
    },
    FieldSpec {
        name: "birthday",
        required: false,
        nullable: true,
        rule: FieldRule::Birthday,
    },
    FieldSpec {
        name: "gender",
        required: false,
        nullable: true,
        rule: FieldRule::Gender,
    },
];

/// Validated arguments for `online_score`.
///
/// Every field is optional on its own; the cross-field rule requires at
/// least one complete identity pair.
#[derive(Debug, Clone)]
pub struct OnlineScoreArgs {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<chrono::NaiveDate>,
    pub gender: Option<i64>,
    supplied: Vec<&'static str>,
}

impl OnlineScoreArgs {
    /// Validate the raw arguments object.
    ///
    /// The pairs rule runs only after every individual field has passed, so
    /// per-field errors are reported first and in full.
    pub fn parse(arguments: &Map<String, Value>) -> Result<Self, ValidationError> {
        let fields = validate(SHAPE, arguments)?;

        let args = Self {
            first_name: fields.text("first_name").map(str::to_string),
            last_name: fields.text("last_name").map(str::to_string),
            email: fields.text("email").map(str::to_string),
            phone: fields.text("phone").map(str::to_string),
            birthday: fields.date("birthday"),
            gender: fields.int("gender"),
            supplied: SHAPE
                .iter()
                .filter(|spec| fields.is_set(spec.name))
                .map(|spec| spec.name)
                .collect(),
        };

        args.check_pairs()?;
        Ok(args)
    }

    /// Names of the fields the caller actually supplied, in shape order.
    pub fn supplied(&self) -> &[&'static str] {
        &self.supplied
    }

    fn check_pairs(&self) -> Result<(), ValidationError> {
        let filled = |value: &Option<String>| value.as_deref().is_some_and(|s| !s.is_empty());

        let name_pair = filled(&self.first_name) && filled(&self.last_name);
        let contact_pair = filled(&self.email) && filled(&self.phone);
        // Gender 0 ("unknown") still counts as supplied here.
        let birth_pair = self.birthday.is_some() && self.supplied.contains(&"gender");

        if name_pair || contact_pair || birth_pair {
            Ok(())
        } else {
            Err(ValidationError::single(
                "at least one of the pairs must be supplied: \
                 first_name/last_name, email/phone, birthday/gender",
            ))
        }
    }
}

/// Handle an `online_score` call.
///
/// Records the supplied field names into the context, then either returns
/// the admin constant or delegates to the scoring logic.
pub async fn handle<S: Store + ?Sized>(
    args: &OnlineScoreArgs,
    ctx: &mut Context,
    store: &S,
    is_admin: bool,
) -> Result<Map<String, Value>, MethodError> {
    ctx.has = Some(args.supplied().iter().map(|s| s.to_string()).collect());

    let mut result = Map::new();
    if is_admin {
        result.insert("score".to_string(), Value::from(ADMIN_SCORE));
        return Ok(result);
    }

    let score = scoring::get_score(
        store,
        args.phone.as_deref(),
        args.email.as_deref(),
        args.birthday,
        args.gender,
        args.first_name.as_deref(),
        args.last_name.as_deref(),
    )
    .await;

    result.insert("score".to_string(), Value::from(score));
    Ok(result)
}

// =============================================================================
// Tests
// =============================================================================
