//! Shared-secret token authentication.
//!
//! Callers prove their identity by supplying a token equal to a SHA-512 hex
//! digest the server can recompute:
//!
//! ```text
//! admin:  sha512( YYYYMMDDHH ++ admin_secret )
//! other:  sha512( account ++ login ++ service_secret )
//! ```
//!
//! The admin token is bucketed by the current hour on the server's local
//! clock, so it rotates without coordination; regular tokens are static per
//! account/login pair. There is deliberately no nonce, signature, or expiry
//! window beyond the admin hour bucket.
//!
//! # Example
//!
//! ```
//! use scoring_api::auth::{user_token, AuthSecrets};
//!
//! let secrets = AuthSecrets::default();
//! let token = user_token("horns&hoofs", "h&f", &secrets);
//! assert_eq!(token.len(), 128); // SHA-512, hex-encoded
//! ```

use chrono::Local;
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

use crate::method::MethodRequest;

/// The fixed admin identity string.
pub const ADMIN_LOGIN: &str = "admin";

/// Built-in service secret, matching the legacy deployment.
pub const DEFAULT_SERVICE_SECRET: &str = "Otus";

/// Built-in admin secret, matching the legacy deployment.
pub const DEFAULT_ADMIN_SECRET: &str = "42";

/// The pair of shared secrets the token scheme is keyed on.
#[derive(Debug, Clone)]
pub struct AuthSecrets {
    /// Secret mixed into regular account/login tokens
    pub service: String,

    /// Secret mixed into hour-bucketed admin tokens
    pub admin: String,
}

impl AuthSecrets {
    /// Create a secrets pair.
    pub fn new(service: impl Into<String>, admin: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            admin: admin.into(),
        }
    }

    /// Whether either secret is still a built-in default.
    pub fn uses_defaults(&self) -> bool {
        self.service == DEFAULT_SERVICE_SECRET || self.admin == DEFAULT_ADMIN_SECRET
    }
}

impl Default for AuthSecrets {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_SECRET, DEFAULT_ADMIN_SECRET)
    }
}

/// Check the token supplied in a validated envelope.
///
/// Returns `true` iff the token equals the expected digest for the caller's
/// identity. A missing token always fails; unset identity fields contribute
/// the empty string. Comparison is constant-time.
pub fn check_auth(request: &MethodRequest, secrets: &AuthSecrets) -> bool {
    let Some(token) = request.token.as_deref() else {
        return false;
    };

    let expected = if request.is_admin() {
        admin_token(secrets)
    } else {
        user_token(
            request.account.as_deref().unwrap_or(""),
            request.login.as_deref().unwrap_or(""),
            secrets,
        )
    };

    expected.as_bytes().ct_eq(token.as_bytes()).into()
}

/// Compute the expected token for a regular account/login pair.
pub fn user_token(account: &str, login: &str, secrets: &AuthSecrets) -> String {
    sha512_hex(format!("{}{}{}", account, login, secrets.service))
}

/// Compute the expected admin token for the current hour.
pub fn admin_token(secrets: &AuthSecrets) -> String {
    let bucket = Local::now().format("%Y%m%d%H");
    sha512_hex(format!("{}{}", bucket, secrets.admin))
}

fn sha512_hex(message: String) -> String {
    hex::encode(Sha512::digest(message.as_bytes()))
}

// =============================================================================
// Tests
// =============================================================================
