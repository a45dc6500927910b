mod assistant;
mod blob;
mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod openapi;
mod staffing;
mod startup;
mod views;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use handlers::MetricsState;

use assistant::ChatClient;
use blob::{BlobStore, S3Client};

pub struct AppState {
    pub db: sqlx::PgPool,
    pub blob: Arc<dyn BlobStore>,
    /// None when no completion API key is configured; the chat route then
    /// rejects with 400.
    pub assistant: Option<ChatClient>,
    pub config: AppConfig,
    pub metrics: Arc<MetricsState>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Conditional JSON/text log output
    let use_json = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()) == "json";

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,showstaff_axum=debug,tower_http=debug".into());

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {}", e);
        e
    })?;

    let db = db::create_pool(&config.database_url).await.map_err(|e| {
        tracing::error!("Failed to create database pool: {}", e);
        e
    })?;
    tracing::info!("Database pool created successfully");

    let metrics_state = Arc::new(handlers::setup_metrics_recorder());
    tracing::info!("Metrics recorder initialized");

    let blob: Arc<dyn BlobStore> = Arc::new(S3Client::new(&config));

    let chat_client = config
        .openai_api_key
        .clone()
        .map(|key| ChatClient::new(key, config.openai_model.clone()));
    if chat_client.is_none() {
        tracing::warn!("OPENAI_API_KEY not set; the assistant chat route is disabled");
    }

    let state = Arc::new(AppState {
        db,
        blob,
        assistant: chat_client,
        config,
        metrics: metrics_state,
    });

    let app = startup::build_router(state);

    let listener = TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
