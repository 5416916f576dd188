use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::controllers::{
    admin_page::AdminPageController, exclusions::ExclusionController, filters::FilterController,
    health,
};
use crate::domain::auth::JwtManager;
use crate::infrastructure::auth::{
    admin_auth_middleware, admin_page_auth_middleware, request_id_middleware,
};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::OptionStore;

/// Build the application router with all routes configured
pub fn build_router(
    option_store: Arc<dyn OptionStore>,
    jwt_manager: Arc<JwtManager>,
    filter_controller: Arc<FilterController>,
    exclusion_controller: Arc<ExclusionController>,
    admin_page_controller: Arc<AdminPageController>,
) -> Router {
    // Filter hooks (called by the host while rendering, no actor)
    let filter_routes = Router::new()
        .route(
            "/api/filters/product-category-ids",
            post(FilterController::product_category_ids),
        )
        .route(
            "/api/filters/product-categories-html",
            post(FilterController::product_categories_html),
        )
        .route("/api/filters/post-terms", post(FilterController::post_terms))
        .route(
            "/api/filters/object-terms",
            post(FilterController::object_terms),
        )
        .route(
            "/api/products/:product_id/category-meta",
            get(FilterController::category_meta),
        )
        .with_state(filter_controller);

    // Admin JSON API (requires manage_catalog)
    let admin_api_routes = Router::new()
        .route(
            "/api/admin/exclusions",
            get(ExclusionController::get_exclusions).put(ExclusionController::save_exclusions),
        )
        .with_state(exclusion_controller)
        .layer(middleware::from_fn_with_state(
            jwt_manager.clone(),
            admin_auth_middleware,
        ));

    // Admin settings page (requires manage_catalog, HTML errors)
    let admin_page_routes = Router::new()
        .route(
            "/admin/exclusions",
            get(AdminPageController::show).post(AdminPageController::save),
        )
        .with_state(admin_page_controller)
        .layer(middleware::from_fn_with_state(
            jwt_manager,
            admin_page_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(option_store)
        .merge(filter_routes)
        .merge(admin_api_routes)
        .merge(admin_page_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
