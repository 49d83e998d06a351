//! HTTP transport layer for the scoring API.
//!
//! This module is a thin wrapper around the dispatch core: it parses the
//! raw body, attaches a correlation id, and wraps results and errors in the
//! response envelope.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        HTTP Layer                          │
//! │                      POST /method                          │
//! │                                                            │
//! │  ┌──────────────┐               ┌───────────────────────┐  │
//! │  │   handlers   │               │        routes         │  │
//! │  │ (envelope)   │               │   (router config)     │  │
//! │  └──────┬───────┘               └───────────────────────┘  │
//! └─────────┼──────────────────────────────────────────────────┘
//!           ▼
//!   method::dispatch (validation → auth → registry → handler)
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    health_handler, method_handler, not_found_handler, ApiError, ApiSuccess, AppState,
    HealthResponse, REQUEST_ID_HEADER,
};
pub use routes::{create_router, RouterConfig};
