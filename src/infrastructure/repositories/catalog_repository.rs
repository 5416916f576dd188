use crate::domain::catalog::{CatalogError, CategoryQuery, CategoryRecord};
use async_trait::async_trait;

/// Read-only access to the external catalog system.
///
/// Implementations only ever read; category assignments stay owned by the catalog.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List categories matching the query
    async fn list_categories(
        &self,
        query: &CategoryQuery,
    ) -> Result<Vec<CategoryRecord>, CatalogError>;

    /// Resolve the storefront URL of a category
    async fn category_link(&self, record: &CategoryRecord) -> Result<String, CatalogError>;

    /// Category ids currently assigned to a product, as stored by the catalog
    async fn product_category_ids(&self, product_id: i64) -> Result<Vec<i64>, CatalogError>;

    /// Post type of an entity (`Some("product")` for products), `None` if unknown
    async fn post_type(&self, id: i64) -> Result<Option<String>, CatalogError>;
}
