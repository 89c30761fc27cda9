mod auth;
mod career;
mod config;
mod db;
mod errors;
mod extraction;
mod listings;
mod llm_client;
mod models;
mod routes;
mod skills;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::sessions::SessionStore;
use crate::auth::store::{MemoryUserStore, PgUserStore, UserStore};
use crate::career::pipeline::CareerPipeline;
use crate::config::{Config, JobSource};
use crate::db::{create_pool, ensure_schema};
use crate::listings::{JSearchListingSource, ListingSource, MockListingSource};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::skills::roles::RoleTable;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first: fails fast on missing required env vars
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pathfinder API v{}", env!("CARGO_PKG_VERSION"));

    // User store: Postgres if configured, otherwise process memory
    let users: Arc<dyn UserStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgUserStore::new(pool))
        }
        None => {
            info!("DATABASE_URL not set; users are kept in memory");
            Arc::new(MemoryUserStore::default())
        }
    };

    let roles = match &config.role_table_path {
        Some(path) => RoleTable::from_json_file(path)?,
        None => RoleTable::default(),
    };
    if roles.is_empty() {
        bail!("Role table is empty; check ROLE_TABLE_PATH");
    }
    info!(
        "Role table loaded: {} roles (default mode: {:?})",
        roles.len(),
        config.role_source
    );

    let llm = LlmClient::new(config.anthropic_api_key.clone())
        .context("Failed to build LLM HTTP client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let listings: Arc<dyn ListingSource> = match config.job_source {
        JobSource::Mock => Arc::new(MockListingSource::default()),
        JobSource::JSearch => {
            let api_key = config
                .jsearch_api_key
                .clone()
                .context("JSEARCH_API_KEY is required when JOB_SOURCE=jsearch")?;
            Arc::new(
                JSearchListingSource::new(api_key)
                    .context("Failed to build job search HTTP client")?,
            )
        }
    };
    info!("Listing source: {}", listings.name());

    let pipeline = CareerPipeline::new(roles, config.role_source, Arc::new(llm), listings);

    let sessions = Arc::new(SessionStore::new(chrono::Duration::seconds(
        config.session_idle_ttl_secs,
    )));
    spawn_session_sweeper(sessions.clone());

    let state = AppState {
        users,
        sessions,
        pipeline: Arc::new(pipeline),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically evicts idle sessions so abandoned ones do not pile up between logins.
fn spawn_session_sweeper(sessions: Arc<SessionStore>) {
    let period = sessions
        .idle_ttl()
        .to_std()
        .unwrap_or(std::time::Duration::from_secs(60))
        .min(std::time::Duration::from_secs(60));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let evicted = sessions.sweep_expired();
            if evicted > 0 {
                info!("Evicted {evicted} idle sessions ({} live)", sessions.len());
            }
        }
    });
}
