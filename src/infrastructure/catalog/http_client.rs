use crate::domain::catalog::{CatalogError, CategoryQuery, CategoryRecord, PRODUCT_POST_TYPE};
use crate::infrastructure::repositories::CatalogRepository;
use async_trait::async_trait;
use moka::future::Cache;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const CATEGORIES_PER_PAGE: usize = 100;
const MAX_CATEGORY_PAGES: usize = 50;

#[derive(Debug, Serialize, Deserialize)]
struct ProductCategoryRef {
    id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProductPayload {
    id: i64,
    #[serde(default)]
    categories: Vec<ProductCategoryRef>,
}

/// Catalog client for a WooCommerce-style REST API.
pub struct HttpCatalogClient {
    base_url: String,
    storefront_url: Option<String>,
    api_key: Option<String>,
    http_client: reqwest::Client,
    cache: Option<Cache<CategoryQuery, Vec<CategoryRecord>>>,
}

impl HttpCatalogClient {
    pub fn new(
        base_url: String,
        storefront_url: Option<String>,
        api_key: Option<String>,
        timeout: Duration,
        cache_enabled: bool,
    ) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Category-Exclusions")
            .build()?;

        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(500)
                    .time_to_live(Duration::from_secs(5 * 60))
                    .build(),
            )
        } else {
            None
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            storefront_url: storefront_url.map(|u| u.trim_end_matches('/').to_string()),
            api_key,
            http_client,
            cache,
        })
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self
            .http_client
            .get(format!("{}{}", self.base_url, path))
            .header("Accept", "application/json");
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    fn query_params(query: &CategoryQuery, page: usize) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("per_page", CATEGORIES_PER_PAGE.to_string()),
            ("page", page.to_string()),
            ("hide_empty", query.hide_empty.to_string()),
            ("orderby", query.order_by.as_str().to_string()),
            ("order", "asc".to_string()),
        ];
        if let Some(ids) = &query.include {
            let joined = ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("include", joined));
        }
        params
    }

    async fn fetch_categories(
        &self,
        query: &CategoryQuery,
    ) -> Result<Vec<CategoryRecord>, CatalogError> {
        let mut records = Vec::new();

        for page in 1..=MAX_CATEGORY_PAGES {
            let response = self
                .get("/products/categories")
                .query(&Self::query_params(query, page))
                .send()
                .await?;

            let batch: Vec<CategoryRecord> = Self::check_status(response).await?.json().await?;
            let batch_len = batch.len();
            records.extend(batch);

            if batch_len < CATEGORIES_PER_PAGE {
                break;
            }
        }

        tracing::debug!(count = records.len(), "Fetched categories from catalog");
        Ok(records)
    }

    async fn fetch_product(&self, product_id: i64) -> Result<Option<ProductPayload>, CatalogError> {
        let response = self
            .get(&format!("/products/{}", product_id))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let product = Self::check_status(response).await?.json().await?;
        Ok(Some(product))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(CatalogError::Status { status, body })
    }
}

#[async_trait]
impl CatalogRepository for HttpCatalogClient {
    async fn list_categories(
        &self,
        query: &CategoryQuery,
    ) -> Result<Vec<CategoryRecord>, CatalogError> {
        let Some(cache) = &self.cache else {
            return self.fetch_categories(query).await;
        };

        if let Some(records) = cache.get(query).await {
            return Ok(records);
        }

        let records = self.fetch_categories(query).await?;
        cache.insert(query.clone(), records.clone()).await;
        Ok(records)
    }

    async fn category_link(&self, record: &CategoryRecord) -> Result<String, CatalogError> {
        if let Some(link) = record.link.as_deref().filter(|l| !l.is_empty()) {
            return Ok(link.to_string());
        }

        match (&self.storefront_url, record.slug.as_deref()) {
            (Some(base), Some(slug)) if !slug.is_empty() => Ok(format!(
                "{}/product-category/{}/",
                base,
                urlencoding::encode(slug)
            )),
            _ => Err(CatalogError::LinkUnavailable(record.id)),
        }
    }

    async fn product_category_ids(&self, product_id: i64) -> Result<Vec<i64>, CatalogError> {
        let product = self
            .fetch_product(product_id)
            .await?
            .ok_or(CatalogError::Status {
                status: StatusCode::NOT_FOUND.as_u16(),
                body: format!("product {} not found", product_id),
            })?;

        Ok(product.categories.into_iter().map(|c| c.id).collect())
    }

    async fn post_type(&self, id: i64) -> Result<Option<String>, CatalogError> {
        Ok(self
            .fetch_product(id)
            .await?
            .map(|_| PRODUCT_POST_TYPE.to_string()))
    }
}
