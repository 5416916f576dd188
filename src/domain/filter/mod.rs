pub mod context;
pub mod render;
pub mod rules;
pub mod service;

pub use context::{is_filterable_context, RequestContext};
pub use service::{CategoryFilterService, CategoryFilterServiceApi};

use crate::domain::catalog::TermRef;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Request for the product category ids filter
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductCategoryIdsRequest {
    pub product_id: i64,
    /// Entries that are not ids are returned as sent.
    #[serde(default)]
    pub ids: Vec<TermRef>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductCategoryIdsResponse {
    pub ids: Vec<TermRef>,
}

/// Request for the product categories markup filter
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductCategoriesHtmlRequest {
    pub product_id: i64,
    #[serde(default)]
    pub html: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HtmlResponse {
    pub html: String,
}

/// Request for the single-post terms filter
#[derive(Debug, Serialize, Deserialize)]
pub struct PostTermsRequest {
    pub post_id: i64,
    pub taxonomy: String,
    #[serde(default)]
    pub terms: Vec<TermRef>,
}

/// Request for the object-terms filter
#[derive(Debug, Serialize, Deserialize)]
pub struct ObjectTermsRequest {
    #[serde(default)]
    pub object_ids: Vec<JsonValue>,
    #[serde(default)]
    pub taxonomies: Vec<String>,
    #[serde(default)]
    pub terms: Vec<TermRef>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TermsResponse {
    pub terms: Vec<TermRef>,
}
