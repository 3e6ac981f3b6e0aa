//! Server setup and initialization
//!
//! Provides the application builder and the server runner.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use gallery_common::{AppConfig, AppError, JwtService};
use gallery_core::SnowflakeGenerator;
use gallery_db::{
    create_pool, run_migrations, PgCommentRepository, PgPool, PgReactionRepository,
    PgUserRepository, PgVoteRepository, PoolConfig, DEFAULT_MIGRATIONS_DIR,
};
use gallery_service::ServiceContext;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;
use crate::storage::{LocalImageStore, UPLOADS_ROUTE};

/// Room for the text fields and multipart framing around an image
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let body_limit = state.max_upload_bytes() + FORM_OVERHEAD_BYTES;

    let router = create_router()
        .nest_service(UPLOADS_ROUTE, ServeDir::new(&config.storage.upload_dir))
        .layer(DefaultBodyLimit::max(body_limit));

    apply_middleware(router, &config.cors, config.app.env.is_production()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.run_migrations {
        run_migrations(&pool, DEFAULT_MIGRATIONS_DIR)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let image_store = LocalImageStore::new(&config.storage.upload_dir)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    let service_context = build_service_context(&config, pool.clone(), image_store)?;
    Ok(AppState::new(service_context, pool, config))
}

/// Wire the Postgres repositories and the image store into a ServiceContext
pub fn build_service_context(
    config: &AppConfig,
    pool: PgPool,
    image_store: LocalImageStore,
) -> Result<ServiceContext, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let worker_id = config.snowflake.worker_id;
    let generator = SnowflakeGenerator::try_new(worker_id)
        .ok_or_else(|| AppError::Config(format!("WORKER_ID {worker_id} does not fit in 10 bits")))?;

    ServiceContext::builder()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .reaction_repo(Arc::new(PgReactionRepository::new(pool.clone())))
        .vote_repo(Arc::new(PgVoteRepository::new(pool)))
        .image_store(Arc::new(image_store))
        .jwt_service(jwt_service)
        .snowflake_generator(Arc::new(generator))
        .policy(config.comments.policy())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Serve `app` on `listener` until Ctrl+C or SIGTERM
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    let state = create_app_state(config).await?;
    run_server(create_app(state), listener).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
