//! QuoteSync Server - random quotes with periodic remote sync.
//!
//! This server keeps a local quote collection in SQLite, serves it over HTTP
//! and periodically reconciles it with a remote quote source using the
//! quotesync-engine merge logic.

mod config;
mod db;
mod error;
mod handlers;
mod remote;
mod routes;
mod sync;
#[cfg(test)]
mod testing;

use crate::config::Config;
use crate::db::KvStore;
use crate::remote::{HttpRemote, QuoteSource};
use crate::sync::{spawn_scheduler, SharedBook, SyncService};
use axum::Router;
use quotesync_engine::{Quote, QuoteBook};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub book: SharedBook,
    pub store: KvStore,
    pub sync: Arc<SyncService>,
    /// Last quote handed out, kept for this process only
    pub last_shown: Arc<RwLock<Option<Quote>>>,
}

impl AppState {
    pub fn new(
        book: QuoteBook,
        store: KvStore,
        remote: Arc<dyn QuoteSource>,
        fetch_limit: usize,
        status_ttl: Duration,
    ) -> Self {
        let book = Arc::new(Mutex::new(book));
        let sync = Arc::new(SyncService::new(
            book.clone(),
            store.clone(),
            remote,
            fetch_limit,
            status_ttl,
        ));

        Self {
            book,
            store,
            sync,
            last_shown: Arc::new(RwLock::new(None)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quotesync_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting QuoteSync Server on {}:{}", config.host, config.port);

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;

    // Run migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await?;

    // Load the local collection
    let store = KvStore::new(pool);
    let book = store.load_book().await?;

    let remote = Arc::new(HttpRemote::new(&config.remote_url, config.remote_timeout)?);

    // Build application state
    let state = AppState::new(
        book,
        store,
        remote,
        config.fetch_limit,
        config.status_ttl,
    );

    match config.sync_interval {
        Some(every) => {
            spawn_scheduler(state.sync.clone(), every);
        }
        None => tracing::info!("Periodic sync disabled"),
    }

    // Build router
    let app = Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
