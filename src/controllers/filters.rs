use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::domain::filter::{
    CategoryFilterService, CategoryFilterServiceApi, HtmlResponse, ObjectTermsRequest,
    PostTermsRequest, ProductCategoriesHtmlRequest, ProductCategoryIdsRequest,
    ProductCategoryIdsResponse, RequestContext, TermsResponse,
};
use crate::error::AppResult;

/// Hook endpoints the host calls while rendering. Every handler answers with
/// the (possibly unchanged) value; read-path failures never surface as errors.
pub struct FilterController {
    filter_service: Arc<CategoryFilterService>,
}

impl FilterController {
    pub fn new(filter_service: Arc<CategoryFilterService>) -> Self {
        Self { filter_service }
    }

    /// POST /api/filters/product-category-ids
    pub async fn product_category_ids(
        State(controller): State<Arc<FilterController>>,
        ctx: RequestContext,
        Json(request): Json<ProductCategoryIdsRequest>,
    ) -> AppResult<Json<ProductCategoryIdsResponse>> {
        let ids = controller
            .filter_service
            .product_category_ids(ctx, request.product_id, request.ids)
            .await;
        Ok(Json(ProductCategoryIdsResponse { ids }))
    }

    /// POST /api/filters/product-categories-html
    pub async fn product_categories_html(
        State(controller): State<Arc<FilterController>>,
        ctx: RequestContext,
        Json(request): Json<ProductCategoriesHtmlRequest>,
    ) -> AppResult<Json<HtmlResponse>> {
        let html = controller
            .filter_service
            .product_categories_html(ctx, request.product_id, request.html)
            .await;
        Ok(Json(HtmlResponse { html }))
    }

    /// POST /api/filters/post-terms
    pub async fn post_terms(
        State(controller): State<Arc<FilterController>>,
        ctx: RequestContext,
        Json(request): Json<PostTermsRequest>,
    ) -> AppResult<Json<TermsResponse>> {
        let terms = controller
            .filter_service
            .terms_for_post(ctx, request.post_id, &request.taxonomy, request.terms)
            .await;
        Ok(Json(TermsResponse { terms }))
    }

    /// POST /api/filters/object-terms
    pub async fn object_terms(
        State(controller): State<Arc<FilterController>>,
        ctx: RequestContext,
        Json(request): Json<ObjectTermsRequest>,
    ) -> AppResult<Json<TermsResponse>> {
        let terms = controller
            .filter_service
            .object_terms(ctx, &request.object_ids, &request.taxonomies, request.terms)
            .await;
        Ok(Json(TermsResponse { terms }))
    }

    /// GET /api/products/:product_id/category-meta
    pub async fn category_meta(
        State(controller): State<Arc<FilterController>>,
        ctx: RequestContext,
        Path(product_id): Path<i64>,
    ) -> AppResult<Json<HtmlResponse>> {
        let html = controller
            .filter_service
            .product_meta_block(ctx, product_id)
            .await;
        Ok(Json(HtmlResponse { html }))
    }
}
