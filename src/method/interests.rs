//! The `clients_interests` method: argument shape and handler.

use serde_json::{Map, Value};

use crate::error::{MethodError, ValidationError};
use crate::schema::{validate, FieldRule, FieldSpec};
use crate::scoring;
use crate::store::Store;

use super::Context;

/// Registered name of this method.
pub const METHOD_NAME: &str = "clients_interests";

const SHAPE: &[FieldSpec] = &[
    FieldSpec {
        name: "client_ids",
        required: true,
        nullable: false,
        rule: FieldRule::ClientIds,
    },
    FieldSpec {
        name: "date",
        required: false,
        nullable: true,
        rule: FieldRule::Date,
    },
];

/// Validated arguments for `clients_interests`.
#[derive(Debug, Clone)]
pub struct ClientsInterestsArgs {
    /// The client ids to look up, in request order; never empty
    pub client_ids: Vec<i64>,

    /// Optional as-of date; accepted and recorded, not used by the lookup
    pub date: Option<chrono::NaiveDate>,
}

impl ClientsInterestsArgs {
    /// Validate the raw arguments object.
    pub fn parse(arguments: &Map<String, Value>) -> Result<Self, ValidationError> {
        let fields = validate(SHAPE, arguments)?;
        Ok(Self {
            client_ids: fields.client_ids("client_ids").unwrap_or_default().to_vec(),
            date: fields.date("date"),
        })
    }
}

/// Handle a `clients_interests` call.
///
/// Records the client count into the context, then resolves each id in
/// order. A failed lookup fails the whole call.
pub async fn handle<S: Store + ?Sized>(
    args: &ClientsInterestsArgs,
    ctx: &mut Context,
    store: &S,
    _is_admin: bool,
) -> Result<Map<String, Value>, MethodError> {
    ctx.nclients = Some(args.client_ids.len());

    let mut result = Map::new();
    for client_id in &args.client_ids {
        let interests = scoring::get_interests(store, *client_id).await?;
        result.insert(client_id.to_string(), Value::from(interests));
    }
    Ok(result)
}

// =============================================================================
// Tests
// =============================================================================
