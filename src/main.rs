use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use category_exclusions::controllers::{
    admin_page::AdminPageController, exclusions::ExclusionController, filters::FilterController,
};
use category_exclusions::domain::auth::{CsrfManager, JwtManager};
use category_exclusions::domain::exclusions::{ExclusionStore, PinnedExclusions};
use category_exclusions::domain::filter::CategoryFilterService;
use category_exclusions::infrastructure::catalog::HttpCatalogClient;
use category_exclusions::infrastructure::config::{Config, LogFormat};
use category_exclusions::infrastructure::db::{check_connection, create_pool, run_migrations};
use category_exclusions::infrastructure::http::{build_router, start_http_server};
use category_exclusions::infrastructure::repositories::{
    CatalogRepository, MemoryOptionRepository, OptionStore, PgOptionRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting Category Exclusions on {}:{}",
        config.host,
        config.port
    );

    let option_store = create_option_store(&config).await?;

    let autoloaded = option_store.autoloaded().await?;
    tracing::info!(count = autoloaded.len(), "Autoloaded options");

    // Catalog client
    tracing::info!(base_url = %config.catalog_api_url, "Initializing catalog client");
    let catalog: Arc<dyn CatalogRepository> = Arc::new(HttpCatalogClient::new(
        config.catalog_api_url.clone(),
        config.storefront_url.clone(),
        config.catalog_api_key.clone(),
        Duration::from_secs(config.catalog_timeout_secs),
        config.catalog_cache_enabled,
    )?);
    if config.storefront_url.is_none() {
        tracing::warn!("STOREFRONT_URL not set; categories without a link will be skipped");
    }

    let config = Arc::new(config);
    let jwt_manager = Arc::new(JwtManager::new(config.jwt_secret.clone()));
    let csrf = Arc::new(CsrfManager::new(
        &config.csrf_secret,
        chrono::Duration::minutes(config.csrf_token_ttl_minutes),
    ));

    // Services
    tracing::info!("Instantiating services...");
    let mut exclusion_store = ExclusionStore::new(option_store.clone());
    if !config.pinned_excluded_ids.is_empty() {
        tracing::info!(pinned = ?config.pinned_excluded_ids, "Pinning excluded categories");
        exclusion_store = exclusion_store.with_adjuster(Arc::new(PinnedExclusions::new(
            config.pinned_excluded_ids.clone(),
        )));
    }
    let exclusion_store = Arc::new(exclusion_store);
    let filter_service = Arc::new(CategoryFilterService::new(
        exclusion_store.clone(),
        catalog.clone(),
    ));

    // Controllers
    tracing::info!("Instantiating controllers...");
    let filter_controller = Arc::new(FilterController::new(filter_service));
    let exclusion_controller = Arc::new(ExclusionController::new(
        exclusion_store.clone(),
        csrf.clone(),
    ));
    let admin_page_controller = Arc::new(AdminPageController::new(exclusion_store, catalog, csrf));

    let app = build_router(
        option_store,
        jwt_manager,
        filter_controller,
        exclusion_controller,
        admin_page_controller,
    );

    start_http_server(config, app).await?;

    Ok(())
}

async fn create_option_store(
    config: &Config,
) -> Result<Arc<dyn OptionStore>, Box<dyn std::error::Error>> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; exclusions are kept in memory only");
        return Ok(Arc::new(MemoryOptionRepository::new()));
    };

    let pool = create_pool(database_url).await?;
    tracing::info!("Database connection pool created");

    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Arc::new(PgOptionRepository::new(Arc::new(pool))))
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "category_exclusions=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
