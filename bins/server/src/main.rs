//! Pinboard API Server
//!
//! Main entry point for the Pinboard backend service.

use anyhow::{Context, bail};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pinboard_api::{AppState, create_router};
use pinboard_core::storage::{StorageConfig, StorageProvider, StorageService};
use pinboard_db::connect;
use pinboard_shared::AppConfig;
use pinboard_shared::config::StorageSettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Build blob storage
    let storage_config = storage_config(&config.storage)?;
    let storage = StorageService::from_config(storage_config)
        .context("Failed to initialize blob storage")?;
    info!(provider = storage.provider_name(), "Blob storage configured");

    // Create application state and router
    let state = AppState::new(db, storage);
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Map the flat configuration section onto the storage provider types.
fn storage_config(settings: &StorageSettings) -> anyhow::Result<StorageConfig> {
    let require = |field: Option<&String>, name: &str| {
        field
            .cloned()
            .with_context(|| format!("storage.{name} is required for provider '{}'", settings.provider))
    };

    let provider = match settings.provider.as_str() {
        "s3" => StorageProvider::s3(
            require(settings.endpoint.as_ref(), "endpoint")?,
            require(settings.bucket.as_ref(), "bucket")?,
            require(settings.access_key_id.as_ref(), "access_key_id")?,
            require(settings.secret_access_key.as_ref(), "secret_access_key")?,
            require(settings.region.as_ref(), "region")?,
        ),
        "azblob" => StorageProvider::azure_blob(
            require(settings.account.as_ref(), "account")?,
            require(settings.access_key.as_ref(), "access_key")?,
            require(settings.container.as_ref(), "container")?,
        ),
        "local" => StorageProvider::local_fs(require(settings.root.as_ref(), "root")?),
        other => bail!("unknown storage provider '{other}'"),
    };

    Ok(StorageConfig::new(provider, settings.public_url_base.clone())
        .with_max_file_size(settings.max_upload_size))
}
