//! Router configuration for the scoring API.
//!
//! # Route Structure
//!
//! ```text
//! POST /method  - method call endpoint
//! GET  /health  - health check
//! *             - JSON 404 envelope
//! ```

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{health_handler, method_handler, not_found_handler, AppState};
use crate::store::Store;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create the default configuration (tracing enabled).
    pub fn new() -> Self {
        Self {
            enable_tracing: true,
        }
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the application router.
///
/// # Example
///
/// ```
/// use scoring_api::auth::AuthSecrets;
/// use scoring_api::server::{create_router, AppState, RouterConfig};
/// use scoring_api::store::MemoryStore;
///
/// let state = AppState::new(MemoryStore::new(), AuthSecrets::default());
/// let router = create_router(state, RouterConfig::new());
/// # let _ = router;
/// ```
pub fn create_router<S>(state: AppState<S>, config: RouterConfig) -> Router
where
    S: Store + 'static,
{
    let router = Router::new()
        .route("/method", post(method_handler::<S>))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .with_state(state);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

// =============================================================================
// Tests
// =============================================================================
