//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use crea_cache::RedisPool;
use crea_common::{AppConfig, AppError, JwtService};
use crea_core::traits::Mailer;
use crea_core::SnowflakeGenerator;
use crea_db::{create_pool, run_migrations};
use crea_service::integrations::{LogMailer, RazorpayClient, SmtpMailer};
use crea_service::services::{AdminService, BootstrapOutcome, PortalSettings};
use crea_service::storage::FileStorage;
use crea_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes, upload_files};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes sit outside the rate limiter.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware(
        create_router().merge(upload_files(&config.storage.upload_dir)),
        config,
    );

    Router::new()
        .merge(health_routes())
        .merge(api)
        .with_state(state)
}

fn create_mailer(config: &AppConfig) -> Result<Arc<dyn Mailer>, AppError> {
    if config.mail.smtp_enabled() {
        let mailer = SmtpMailer::new(&config.mail)?;
        info!("SMTP mailer configured");
        return Ok(Arc::new(mailer));
    }

    warn!("SMTP_HOST not set; outgoing mail is logged instead of sent");
    Ok(Arc::new(LogMailer))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("migration failed: {e}")))?;
    }

    info!("Connecting to Redis...");
    let redis_pool = RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis connection established");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));
    let payment_gateway = Arc::new(RazorpayClient::new(&config.payment)?);
    let mailer = create_mailer(&config)?;
    let storage = FileStorage::new(&config.storage.upload_dir, config.storage.max_file_size_bytes());

    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(redis_pool)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .mailer(mailer)
        .payment_gateway(payment_gateway)
        .storage(storage)
        .settings(PortalSettings::from_config(&config))
        .refresh_token_ttl(u64::try_from(config.jwt.refresh_token_expiry).unwrap_or_default())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    match AdminService::new(&service_context).ensure_admin(&config.admin).await? {
        BootstrapOutcome::NotConfigured => info!("Admin bootstrap skipped: ADMIN_EMAIL/ADMIN_PASSWORD not set"),
        outcome => info!(?outcome, "Admin bootstrap complete"),
    }

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, &addr).await
}
