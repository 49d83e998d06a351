//! Configuration management for the scoring API.
//!
//! Configuration comes from command-line arguments via clap, with
//! environment-variable fallbacks under the `SCORE_` prefix and sensible
//! defaults for everything optional.
//!
//! # Environment Variables
//!
//! - `SCORE_HOST` - server bind address (default: 127.0.0.1)
//! - `SCORE_PORT` - server port (default: 8080)
//! - `SCORE_SERVICE_SECRET` - secret for regular account/login tokens
//! - `SCORE_ADMIN_SECRET` - secret for hour-bucketed admin tokens
//! - `SCORE_STORE_CAPACITY` - max entries in the in-memory store

use clap::{Args, Parser, Subcommand};

use crate::auth::{DEFAULT_ADMIN_SECRET, DEFAULT_SERVICE_SECRET};
use crate::store::DEFAULT_STORE_CAPACITY;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8080;

// =============================================================================
// CLI
// =============================================================================

/// Scoring API - a single-endpoint JSON API for score and interest lookups.
#[derive(Parser, Debug, Clone)]
#[command(name = "scoring-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server.
    Serve(ServeConfig),

    /// Print the expected token for a login/account pair.
    Token(TokenConfig),
}

// =============================================================================
// Serve Configuration
// =============================================================================

/// Configuration for the `serve` command.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "SCORE_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "SCORE_PORT")]
    pub port: u16,

    /// Shared secret for regular account/login tokens.
    #[arg(long, default_value = DEFAULT_SERVICE_SECRET, env = "SCORE_SERVICE_SECRET")]
    pub service_secret: String,

    /// Shared secret for hour-bucketed admin tokens.
    #[arg(long, default_value = DEFAULT_ADMIN_SECRET, env = "SCORE_ADMIN_SECRET")]
    pub admin_secret: String,

    /// Maximum number of entries in the in-memory store.
    #[arg(long, default_value_t = DEFAULT_STORE_CAPACITY, env = "SCORE_STORE_CAPACITY")]
    pub store_capacity: usize,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.service_secret.is_empty() {
            return Err(
                "service secret must not be empty. Set --service-secret or SCORE_SERVICE_SECRET"
                    .to_string(),
            );
        }
        if self.admin_secret.is_empty() {
            return Err(
                "admin secret must not be empty. Set --admin-secret or SCORE_ADMIN_SECRET"
                    .to_string(),
            );
        }
        if self.store_capacity == 0 {
            return Err("store_capacity must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Token Configuration
// =============================================================================

/// Configuration for the `token` command.
#[derive(Args, Debug, Clone)]
pub struct TokenConfig {
    /// Login to compute the token for; the admin login selects the
    /// hour-bucketed scheme.
    #[arg(long)]
    pub login: String,

    /// Account the token is bound to (ignored for admin).
    #[arg(long, default_value = "")]
    pub account: String,

    /// Shared secret for regular account/login tokens.
    #[arg(long, default_value = DEFAULT_SERVICE_SECRET, env = "SCORE_SERVICE_SECRET")]
    pub service_secret: String,

    /// Shared secret for hour-bucketed admin tokens.
    #[arg(long, default_value = DEFAULT_ADMIN_SECRET, env = "SCORE_ADMIN_SECRET")]
    pub admin_secret: String,
}

// =============================================================================
// Tests
// =============================================================================
