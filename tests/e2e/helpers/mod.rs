use category_exclusions::controllers::{
    admin_page::AdminPageController, exclusions::ExclusionController, filters::FilterController,
};
use category_exclusions::domain::auth::{CsrfManager, JwtManager};
use category_exclusions::domain::exclusions::ExclusionStore;
use category_exclusions::domain::filter::CategoryFilterService;
use category_exclusions::infrastructure::config::{Config, Environment, LogFormat};
use category_exclusions::infrastructure::http::build_router;
use category_exclusions::infrastructure::repositories::{
    CatalogRepository, MemoryOptionRepository, OptionStore,
};
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod catalog;

use api_client::TestClient;
use catalog::InMemoryCatalog;
use fixtures::TestFixtures;

pub struct TestContext {
    pub client: TestClient,
    #[allow(dead_code)]
    pub config: Config,
    pub fixtures: TestFixtures,
    #[allow(dead_code)]
    pub option_store: Arc<MemoryOptionRepository>,
    #[allow(dead_code)]
    pub catalog: Arc<InMemoryCatalog>,
}

fn test_config() -> Config {
    Config {
        database_url: None,
        host: "127.0.0.1".to_string(),
        port: 0, // Will be assigned by the OS
        jwt_secret: "test-jwt-secret-key-for-testing-only".to_string(),
        csrf_secret: "test-csrf-secret-key-for-testing-only".to_string(),
        csrf_token_ttl_minutes: 60,
        pinned_excluded_ids: Vec::new(),
        environment: Environment::Development,
        log_format: LogFormat::Pretty,
        catalog_api_url: "http://catalog.invalid/wp-json/wc/v3".to_string(),
        catalog_api_key: None,
        storefront_url: Some("https://shop.test".to_string()),
        catalog_timeout_secs: 1,
        catalog_cache_enabled: false,
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let config = test_config();

            let option_store = Arc::new(MemoryOptionRepository::new());
            let catalog = Arc::new(InMemoryCatalog::new());
            let jwt_manager = Arc::new(JwtManager::new(config.jwt_secret.clone()));
            let csrf = Arc::new(CsrfManager::new(
                &config.csrf_secret,
                chrono::Duration::minutes(config.csrf_token_ttl_minutes),
            ));

            let store: Arc<dyn OptionStore> = option_store.clone();
            let catalog_repo: Arc<dyn CatalogRepository> = catalog.clone();

            let exclusion_store = Arc::new(ExclusionStore::new(store.clone()));
            let filter_service = Arc::new(CategoryFilterService::new(
                exclusion_store.clone(),
                catalog_repo.clone(),
            ));

            let app = build_router(
                store,
                jwt_manager,
                Arc::new(FilterController::new(filter_service)),
                Arc::new(ExclusionController::new(
                    exclusion_store.clone(),
                    csrf.clone(),
                )),
                Arc::new(AdminPageController::new(
                    exclusion_store.clone(),
                    catalog_repo,
                    csrf.clone(),
                )),
            );

            // Start server
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            let client = TestClient::new(&base_url);
            let fixtures = TestFixtures::new(
                &config.jwt_secret,
                csrf,
                exclusion_store,
                catalog.clone(),
            );
            fixtures.seed_catalog();

            Self {
                client,
                config,
                fixtures,
                option_store,
                catalog,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}
