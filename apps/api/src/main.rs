mod applications;
mod auth;
mod config;
mod db;
mod errors;
mod external_jobs;
mod jobs;
mod models;
mod recommendation;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::TokenService;
use crate::config::Config;
use crate::db::create_pool;
use crate::external_jobs::RemotiveClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Portal API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL; the process exits if the store is unreachable
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(db));

    // Initialize external listings client
    let external_jobs = RemotiveClient::new(
        config.external_jobs_url.clone(),
        config.external_jobs_limit,
    )?;
    info!("External jobs client initialized ({})", config.external_jobs_url);

    let tokens = TokenService::new(&config.jwt_secret, config.token_ttl_hours);
    if config.admin_emails.is_empty() {
        info!("ADMIN_EMAILS is empty; no account will be granted the admin role");
    }

    // Build app state
    let state = AppState {
        users: store.clone(),
        jobs: store.clone(),
        applications: store,
        external_jobs: Arc::new(external_jobs),
        tokens,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
