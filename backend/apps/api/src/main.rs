//! API Server Entry Point
//!
//! Uses `anyhow` for startup errors; request errors go through
//! `kernel::error::AppError`.

use auth::domain::repository::SessionRepository;
use auth::{AuthAppState, MySqlAuthRepository};
use linkboard::app::{HttpOptions, build_app, log_routes};
use linkboard::config::{self, AppConfig};
use post::{MongoPostRepository, PostAppState};
use sqlx::mysql::MySqlPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = config::load_env_file()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linkboard=info,auth=info,post=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(path) = env_file {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    // Relational store: users and sessions
    let pool = MySqlPoolOptions::new()
        .max_connections(config.mysql_max_connections)
        .connect(&config.mysql_dsn)
        .await?;
    tracing::info!("Connected to MySQL");

    auth::MIGRATOR.run(&pool).await?;
    tracing::info!("Migrations completed");

    let auth_repo = MySqlAuthRepository::new(pool);

    // Errors here should not prevent server startup
    match auth_repo.cleanup_expired().await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Expired session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Expired session cleanup failed, continuing anyway");
        }
    }

    // Document store: posts
    let mongo = mongodb::Client::with_uri_str(&config.mongo_uri).await?;
    let post_repo = MongoPostRepository::new(&mongo.database(&config.mongo_db_name));
    if let Err(e) = post_repo.ensure_indexes().await {
        tracing::warn!(error = %e, "Post index creation failed, continuing anyway");
    }
    tracing::info!(database = %config.mongo_db_name, "Connected to MongoDB");

    let (app, routes) = build_app(
        AuthAppState::new(auth_repo, config.auth_config()),
        PostAppState::new(post_repo),
        &HttpOptions {
            static_dir: config.static_dir.clone(),
            frontend_origins: config.frontend_origins.clone(),
        },
    );
    log_routes(&routes);

    tracing::info!("Listening on {}", config.listen_addr);
    let listener = TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
