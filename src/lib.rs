//! # Scoring API
//!
//! A single-endpoint JSON API that validates untrusted client requests
//! against declarative field schemas, authenticates callers with a
//! shared-secret token scheme, and dispatches to one of two methods:
//! `online_score` and `clients_interests`.
//!
//! ## Features
//!
//! - **Declarative validation**: request shapes are ordered lists of field
//!   specifications; every violation in a request is reported at once
//! - **Two-phase pipeline**: the envelope is validated and authenticated
//!   before the method-specific arguments are looked at
//! - **Shared-secret auth**: SHA-512 tokens, with an hour-bucketed token
//!   for the admin identity
//! - **Pluggable store**: handlers reach storage only through the [`Store`]
//!   trait; a bounded in-memory TTL store ships in the box
//!
//! ## Architecture
//!
//! - [`schema`] - field specifications, rules, and the validation driver
//! - [`method`] - request models, the method registry, and dispatch
//! - [`auth`] - token computation and checking
//! - [`scoring`] - score computation and interest lookups
//! - [`store`] - the storage trait and the in-memory implementation
//! - [`server`] - Axum-based HTTP transport and routes
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```
//! use scoring_api::{AppState, AuthSecrets, MemoryStore, RouterConfig};
//!
//! let state = AppState::new(MemoryStore::new(), AuthSecrets::default());
//! let router = scoring_api::create_router(state, RouterConfig::new());
//! # let _ = router;
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod method;
pub mod schema;
pub mod scoring;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use auth::{admin_token, check_auth, user_token, AuthSecrets, ADMIN_LOGIN};
pub use config::{Cli, Command, ServeConfig, TokenConfig};
pub use error::{MethodError, StoreError, ValidationError};
pub use method::{
    dispatch, ClientsInterestsArgs, Context, MethodRequest, OnlineScoreArgs, ADMIN_SCORE,
    METHOD_NAMES,
};
pub use schema::{validate, FieldMap, FieldRule, FieldSpec, FieldValue, GENDERS};
pub use scoring::{get_interests, get_score};
pub use server::{create_router, ApiError, ApiSuccess, AppState, RouterConfig, REQUEST_ID_HEADER};
pub use store::{MemoryStore, Store, DEFAULT_STORE_CAPACITY};
