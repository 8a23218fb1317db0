//! AppTwice Server: session and token lifecycle service
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use apptwice_auth::client::{ClientStore, MemoryClientStore, PgClientStore};
use apptwice_auth::session::{MemorySessionStore, PgSessionStore, SessionStore};
use apptwice_cache::CacheManager;
use apptwice_core::config::AppConfig;
use apptwice_core::config::session::StoreBackend;
use apptwice_core::error::AppError;
use apptwice_database::DatabasePool;
use apptwice_database::repositories::client::ClientRepository;
use apptwice_database::repositories::session::SessionRepository;

#[tokio::main]
async fn main() {
    let env = std::env::var("APPTWICE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting AppTwice v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Session and client stores ────────────────────────
    let (sessions, clients, db_pool) = open_stores(&config).await?;

    // ── Step 2: Initialize revocation cache ──────────────────────
    tracing::info!(
        "Initializing cache (provider: {})...",
        config.cache.provider
    );
    let cache = Arc::new(CacheManager::new(&config.cache).await?);
    tracing::info!("Cache initialized");

    // ── Step 3: Auth system ──────────────────────────────────────
    // An empty signing key aborts startup here.
    let state = apptwice_api::build_state(config.clone(), cache, sessions, clients)
        .map_err(|e| AppError::configuration(format!("Auth init failed: {e}")))?;

    if config.auth.admin_key.is_empty() {
        tracing::warn!("auth.admin_key is empty, admin endpoints are disabled");
    }

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app = apptwice_api::build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("AppTwice server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("AppTwice server stopped");
    Ok(())
}

type Stores = (Arc<dyn SessionStore>, Arc<dyn ClientStore>, Option<DatabasePool>);

/// Open the configured persistence backend.
async fn open_stores(config: &AppConfig) -> Result<Stores, AppError> {
    match config.session.store {
        StoreBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let db = DatabasePool::connect(&config.database).await?;

            if config.database.run_migrations {
                tracing::info!("Running database migrations...");
                apptwice_database::migration::run_migrations(db.pool()).await?;
                tracing::info!("Database migrations complete");
            }

            let session_repo = Arc::new(SessionRepository::new(db.pool().clone()));
            let client_repo = Arc::new(ClientRepository::new(db.pool().clone()));
            let sessions: Arc<dyn SessionStore> = Arc::new(PgSessionStore::new(session_repo));
            let clients: Arc<dyn ClientStore> = Arc::new(PgClientStore::new(client_repo));
            Ok((sessions, clients, Some(db)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory session store, sessions are lost on restart");
            let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
            let clients: Arc<dyn ClientStore> = Arc::new(MemoryClientStore::new());
            Ok((sessions, clients, None))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
