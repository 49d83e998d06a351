//! The outer request envelope: caller identity, token, target method, and
//! opaque method arguments.

use serde_json::{Map, Value};

use crate::auth::ADMIN_LOGIN;
use crate::error::ValidationError;
use crate::schema::{validate, FieldRule, FieldSpec};

const ENVELOPE_SHAPE: &[FieldSpec] = &[
    FieldSpec {
        name: "account",
        required: false,
        nullable: true,
        rule: FieldRule::Text,
    },
    FieldSpec {
        name: "login",
        required: true,
        nullable: true,
        rule: FieldRule::Text,
    },
    FieldSpec {
        name: "token",
        required: true,
        nullable: true,
        rule: FieldRule::Text,
    },
    FieldSpec {
        name: "arguments",
        required: true,
        nullable: true,
        rule: FieldRule::Arguments,
    },
    FieldSpec {
        name: "method",
        required: true,
        nullable: false,
        rule: FieldRule::Text,
    },
];

/// A validated request envelope.
#[derive(Debug, Clone)]
pub struct MethodRequest {
    /// Caller account, when supplied
    pub account: Option<String>,

    /// Caller login; required to be present, but its value may be empty
    pub login: Option<String>,

    /// Supplied auth token
    pub token: Option<String>,

    /// Opaque arguments for the dispatched method; unset or null collapses
    /// to an empty object so argument validation can report field errors
    pub arguments: Map<String, Value>,

    /// Target method name, guaranteed non-empty
    pub method: String,
}

impl MethodRequest {
    /// Validate a raw request body into an envelope, accumulating all field
    /// errors.
    pub fn parse(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        let fields = validate(ENVELOPE_SHAPE, body)?;
        Ok(Self {
            account: fields.text("account").map(str::to_string),
            login: fields.text("login").map(str::to_string),
            token: fields.text("token").map(str::to_string),
            arguments: fields.arguments("arguments").cloned().unwrap_or_default(),
            method: fields.text("method").unwrap_or_default().to_string(),
        })
    }

    /// Whether the caller is the fixed admin identity.
    pub fn is_admin(&self) -> bool {
        self.login.as_deref() == Some(ADMIN_LOGIN)
    }
}

// =============================================================================
// Tests
// =============================================================================
