//! Scoring API - a single-endpoint JSON API for score and interest lookups.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scoring_api::{
    auth::{admin_token, user_token, AuthSecrets, ADMIN_LOGIN},
    config::{Cli, Command, ServeConfig, TokenConfig},
    server::{create_router, AppState, RouterConfig},
    store::MemoryStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(config) => run_serve(config).await,
        Command::Token(config) => run_token(config),
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let secrets = AuthSecrets::new(&config.service_secret, &config.admin_secret);

    info!("Configuration:");
    info!("  Store capacity: {} entries", config.store_capacity);
    info!("  Methods: online_score, clients_interests");
    if secrets.uses_defaults() {
        warn!("  Auth: using built-in default secrets");
        warn!("        Set SCORE_SERVICE_SECRET and SCORE_ADMIN_SECRET in production");
    } else {
        info!("  Auth: custom secrets configured");
    }

    let store = MemoryStore::with_capacity(config.store_capacity);
    let state = AppState::new(store, secrets);
    let router_config = RouterConfig::new().with_tracing(!config.no_tracing);
    let router = create_router(state, router_config);

    let addr = config.bind_address();
    info!("");
    info!("Server listening on: http://{}", addr);
    info!("  curl http://{}/health", addr);
    info!("  curl -X POST http://{}/method -d '{{...}}'", addr);
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "scoring_api=debug,tower_http=debug"
    } else {
        "scoring_api=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// =============================================================================
// Token Command
// =============================================================================

fn run_token(config: TokenConfig) -> ExitCode {
    let secrets = AuthSecrets::new(&config.service_secret, &config.admin_secret);

    let token = if config.login == ADMIN_LOGIN {
        admin_token(&secrets)
    } else {
        user_token(&config.account, &config.login, &secrets)
    };

    println!("{}", token);

    if config.login == ADMIN_LOGIN {
        eprintln!();
        eprintln!("Note: admin tokens are bucketed by the current hour and expire with it.");
    }

    ExitCode::SUCCESS
}
