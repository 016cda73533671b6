mod config;
mod db;
mod errors;
mod interview;
mod llm_client;
mod models;
mod notify;
mod practice;
mod retention;
mod routes;
mod session;
mod state;
mod store;

#[cfg(test)]
mod testutil;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::llm_client::LlmClient;
use crate::notify::{Notifier, SmtpNotifier};
use crate::retention::RetentionSweep;
use crate::routes::build_router;
use crate::session::{AnswerEvaluator, QuestionGenerator};
use crate::state::AppState;
use crate::store::pg::PgStore;
use crate::store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails startup on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Parley API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;
    let store: Arc<dyn Store> = Arc::new(PgStore::new(pool));

    // Initialize LLM client — one instance serves both question generation
    // and answer evaluation.
    let llm = Arc::new(LlmClient::new(config.anthropic_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let generator: Arc<dyn QuestionGenerator> = llm.clone();
    let evaluator: Arc<dyn AnswerEvaluator> = llm;

    // Initialize SMTP notifier
    let notifier: Arc<dyn Notifier> = Arc::new(SmtpNotifier::new(&config.smtp)?);
    info!("SMTP notifier initialized (relay: {})", config.smtp.host);

    // Build app state
    let state = AppState::new(
        Arc::clone(&store),
        generator,
        evaluator,
        Arc::clone(&notifier),
        config.clone(),
    );

    spawn_retention_task(store, notifier, config.retention_days);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Runs the retention sweep once a day in the background.
fn spawn_retention_task(store: Arc<dyn Store>, notifier: Arc<dyn Notifier>, retention_days: i64) {
    let sweep = RetentionSweep::new(store, notifier);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(24 * 60 * 60));
        interval.tick().await; // first tick fires immediately
        loop {
            interval.tick().await;
            match sweep.purge(chrono::Duration::days(retention_days)).await {
                Ok(report) => info!(
                    deleted = report.interviews_deleted,
                    hrs = report.hrs_notified,
                    "scheduled retention sweep finished"
                ),
                Err(e) => warn!("scheduled retention sweep failed: {e}"),
            }
        }
    });
}
