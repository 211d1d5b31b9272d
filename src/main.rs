//! # Anime Schedule Bot Main Entry Point
//!
//! Initializes logging, loads configuration, opens custom list storage,
//! builds the schedule client and runs the Telegram bot next to the health
//! HTTP server.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use anime_schedule_bot::bot::handlers::BotHandler;
use anime_schedule_bot::bot::AppContext;
use anime_schedule_bot::config::Config;
use anime_schedule_bot::database::connection::DatabaseManager;
use anime_schedule_bot::services::custom_list::CustomListStore;
use anime_schedule_bot::services::health::HealthService;
use anime_schedule_bot::services::schedule::ScheduleAggregator;
use anime_schedule_bot::services::schedule_source::AnimeScheduleClient;
use anime_schedule_bot::storage::{JsonFileStorage, ListStorage, SqliteListStorage};
use anime_schedule_bot::utils::logging::log_system_event;

async fn open_storage(config: &Config) -> Result<Arc<dyn ListStorage>> {
    match &config.database_url {
        Some(database_url) => {
            info!("Initializing SQLite custom list storage...");
            let db_manager = DatabaseManager::new(database_url).await?;
            info!("Running database migrations...");
            db_manager.run_migrations().await?;
            Ok(Arc::new(SqliteListStorage::new(db_manager)))
        }
        None => {
            info!(
                "Using JSON custom list storage at {}",
                config.custom_lists_file.display()
            );
            Ok(Arc::new(JsonFileStorage::new(&config.custom_lists_file)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anime_schedule_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Anime Schedule Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - API: {}, HTTP Port: {}, Admins: {}",
        config.api_base,
        config.http_port,
        config.admin_ids.len()
    );
    if config.admin_ids.is_empty() {
        tracing::warn!("ADMIN_IDS is empty; admin-only commands will be refused for everyone");
    }

    // Initialize storage
    let storage = open_storage(&config).await?;
    if let Err(e) = storage.check().await {
        tracing::warn!("Custom list storage is not readable yet: {}", e);
    }
    let lists = Arc::new(CustomListStore::new(storage));
    info!("Custom list storage initialized ({})", lists.backend());

    // Initialize schedule client
    let source = AnimeScheduleClient::new(
        config.api_base.clone(),
        config.animeschedule_token.clone(),
        Duration::from_secs(config.fetch_timeout_secs),
    )?;
    let app = Arc::new(AppContext {
        schedule: ScheduleAggregator::new(Arc::new(source)),
        lists: lists.clone(),
        admins: config.admin_ids.clone(),
        start_image: config.start_image.clone(),
        list_image: config.list_image.clone(),
    });

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(app);
    info!("Telegram bot initialized successfully");

    // Initialize health service
    let health_service = HealthService::new(lists);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    log_system_event("Application stopped", None);
    Ok(())
}
