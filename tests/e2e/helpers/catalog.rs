use async_trait::async_trait;
use category_exclusions::domain::catalog::{
    CatalogError, CategoryOrder, CategoryQuery, CategoryRecord, PRODUCT_POST_TYPE,
};
use category_exclusions::infrastructure::repositories::CatalogRepository;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
struct CatalogState {
    categories: Vec<CategoryRecord>,
    products: HashMap<i64, Vec<i64>>,
    post_types: HashMap<i64, String>,
    unavailable: bool,
}

/// In-memory stand-in for the store's catalog API.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

#[allow(dead_code)]
impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_category(&self, id: i64, name: &str) {
        let record = CategoryRecord::new(id, name).with_slug(name.to_lowercase().replace(' ', "-"));
        self.state.write().categories.push(record);
    }

    pub fn add_product(&self, product_id: i64, category_ids: &[i64]) {
        let mut state = self.state.write();
        state.products.insert(product_id, category_ids.to_vec());
        state
            .post_types
            .insert(product_id, PRODUCT_POST_TYPE.to_string());
    }

    pub fn add_post(&self, post_id: i64, post_type: &str) {
        self.state
            .write()
            .post_types
            .insert(post_id, post_type.to_string());
    }

    /// Make every catalog call fail as if the API were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.write().unavailable = unavailable;
    }

    fn check_available(&self) -> Result<(), CatalogError> {
        if self.state.read().unavailable {
            return Err(CatalogError::Status {
                status: 503,
                body: "catalog unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn list_categories(
        &self,
        query: &CategoryQuery,
    ) -> Result<Vec<CategoryRecord>, CatalogError> {
        self.check_available()?;
        let state = self.state.read();

        let records = match (&query.include, query.order_by) {
            (Some(ids), CategoryOrder::Include) => ids
                .iter()
                .filter_map(|id| state.categories.iter().find(|c| c.id == *id).cloned())
                .collect(),
            (Some(ids), CategoryOrder::Name) => {
                let mut records: Vec<CategoryRecord> = state
                    .categories
                    .iter()
                    .filter(|c| ids.contains(&c.id))
                    .cloned()
                    .collect();
                records.sort_by(|a, b| a.name.cmp(&b.name));
                records
            }
            (None, _) => {
                let mut records = state.categories.clone();
                records.sort_by(|a, b| a.name.cmp(&b.name));
                records
            }
        };

        Ok(records)
    }

    async fn category_link(&self, record: &CategoryRecord) -> Result<String, CatalogError> {
        self.check_available()?;
        match record.slug.as_deref() {
            Some(slug) => Ok(format!("https://shop.test/product-category/{}/", slug)),
            None => Err(CatalogError::LinkUnavailable(record.id)),
        }
    }

    async fn product_category_ids(&self, product_id: i64) -> Result<Vec<i64>, CatalogError> {
        self.check_available()?;
        self.state
            .read()
            .products
            .get(&product_id)
            .cloned()
            .ok_or(CatalogError::Status {
                status: 404,
                body: format!("product {} not found", product_id),
            })
    }

    async fn post_type(&self, id: i64) -> Result<Option<String>, CatalogError> {
        self.check_available()?;
        Ok(self.state.read().post_types.get(&id).cloned())
    }
}
