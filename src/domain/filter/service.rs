use super::context::{is_filterable_context, RequestContext};
use super::render::{render_category_list, render_product_meta};
use super::rules::{
    filter_ids, filter_records, filter_terms, filter_terms_for_entity, leading_object_id,
    requests_product_categories,
};
use crate::domain::catalog::{
    CategoryQuery, CategoryRecord, TermRef, PRODUCT_CATEGORY_TAXONOMY, PRODUCT_POST_TYPE,
};
use crate::domain::exclusions::{ExcludedCategorySet, ExclusionStore, ExclusionStoreApi};
use crate::infrastructure::repositories::CatalogRepository;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::sync::Arc;

pub struct CategoryFilterService {
    exclusion_store: Arc<ExclusionStore>,
    catalog: Arc<dyn CatalogRepository>,
}

impl CategoryFilterService {
    pub fn new(exclusion_store: Arc<ExclusionStore>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self {
            exclusion_store,
            catalog,
        }
    }
}

/// Read-path filters. Outside a storefront single-product view every
/// operation hands its input back untouched.
#[async_trait]
pub trait CategoryFilterServiceApi: Send + Sync {
    /// Filter the raw category ids of a product. Entries that are not ids
    /// are kept.
    async fn product_category_ids(
        &self,
        ctx: RequestContext,
        product_id: i64,
        ids: Vec<TermRef>,
    ) -> Vec<TermRef>;

    /// Rebuild a product's category link markup without excluded categories.
    /// With nothing excluded the original markup is returned.
    async fn product_categories_html(
        &self,
        ctx: RequestContext,
        product_id: i64,
        original_html: String,
    ) -> String;

    /// Filter the terms attached to a single post
    async fn terms_for_post(
        &self,
        ctx: RequestContext,
        post_id: i64,
        taxonomy: &str,
        terms: Vec<TermRef>,
    ) -> Vec<TermRef>;

    /// Filter the terms of an object-terms lookup
    async fn object_terms(
        &self,
        ctx: RequestContext,
        object_ids: &[JsonValue],
        taxonomies: &[String],
        terms: Vec<TermRef>,
    ) -> Vec<TermRef>;

    /// Category block for the end of the product metadata section
    async fn product_meta_block(&self, ctx: RequestContext, product_id: i64) -> String;
}

#[async_trait]
impl CategoryFilterServiceApi for CategoryFilterService {
    async fn product_category_ids(
        &self,
        ctx: RequestContext,
        product_id: i64,
        ids: Vec<TermRef>,
    ) -> Vec<TermRef> {
        if !is_filterable_context(ctx) {
            return ids;
        }

        let excluded = self.exclusion_store.get_excluded().await;
        let before = ids.len();
        let kept = filter_terms(ids, &excluded);
        tracing::debug!(
            product_id,
            before,
            after = kept.len(),
            "Filtered product category ids"
        );
        kept
    }

    async fn product_categories_html(
        &self,
        ctx: RequestContext,
        product_id: i64,
        original_html: String,
    ) -> String {
        if !is_filterable_context(ctx) {
            return original_html;
        }

        let excluded = self.exclusion_store.get_excluded().await;
        if excluded.is_empty() {
            return original_html;
        }

        match self.visible_categories(product_id, &excluded).await {
            Some(records) => render_category_list(&records, &original_html),
            None => String::new(),
        }
    }

    async fn terms_for_post(
        &self,
        ctx: RequestContext,
        post_id: i64,
        taxonomy: &str,
        terms: Vec<TermRef>,
    ) -> Vec<TermRef> {
        if !is_filterable_context(ctx)
            || terms.is_empty()
            || taxonomy != PRODUCT_CATEGORY_TAXONOMY
        {
            return terms;
        }

        let Some(post_type) = self.post_type_or_none(post_id).await else {
            return terms;
        };

        let excluded = self.exclusion_store.get_excluded().await;
        filter_terms_for_entity(terms, Some(post_type.as_str()), taxonomy, &excluded)
    }

    async fn object_terms(
        &self,
        ctx: RequestContext,
        object_ids: &[JsonValue],
        taxonomies: &[String],
        terms: Vec<TermRef>,
    ) -> Vec<TermRef> {
        if !is_filterable_context(ctx)
            || terms.is_empty()
            || !requests_product_categories(taxonomies)
        {
            return terms;
        }

        if let Some(object_id) = leading_object_id(object_ids) {
            match self.post_type_or_none(object_id).await {
                Some(post_type) if post_type == PRODUCT_POST_TYPE => {}
                _ => return terms,
            }
        }

        let excluded = self.exclusion_store.get_excluded().await;
        filter_terms(terms, &excluded)
    }

    async fn product_meta_block(&self, ctx: RequestContext, product_id: i64) -> String {
        if !is_filterable_context(ctx) {
            return String::new();
        }

        let excluded = self.exclusion_store.get_excluded().await;
        match self.visible_categories(product_id, &excluded).await {
            Some(records) => render_product_meta(&records),
            None => String::new(),
        }
    }
}

impl CategoryFilterService {
    /// Categories of a product that survive the exclusion filter, with links
    /// resolved. `None` when the catalog could not be read or nothing is left.
    async fn visible_categories(
        &self,
        product_id: i64,
        excluded: &ExcludedCategorySet,
    ) -> Option<Vec<CategoryRecord>> {
        let assigned = match self.catalog.product_category_ids(product_id).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(product_id, error = %e, "Failed to load product categories");
                return None;
            }
        };

        let kept = filter_ids(&assigned, excluded);
        if kept.is_empty() {
            return None;
        }

        let records = match self
            .catalog
            .list_categories(&CategoryQuery::including(&kept))
            .await
        {
            Ok(records) => filter_records(records, excluded),
            Err(e) => {
                tracing::warn!(product_id, error = %e, "Failed to load category records");
                return None;
            }
        };

        let mut linked = Vec::with_capacity(records.len());
        for record in records {
            match self.catalog.category_link(&record).await {
                Ok(url) => linked.push(CategoryRecord {
                    link: Some(url),
                    ..record
                }),
                Err(e) => {
                    tracing::warn!(category_id = record.id, error = %e, "Skipping category without link");
                }
            }
        }

        if linked.is_empty() {
            None
        } else {
            Some(linked)
        }
    }

    async fn post_type_or_none(&self, id: i64) -> Option<String> {
        match self.catalog.post_type(id).await {
            Ok(post_type) => post_type,
            Err(e) => {
                tracing::warn!(object_id = id, error = %e, "Failed to resolve post type");
                None
            }
        }
    }
}
