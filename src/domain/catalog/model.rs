use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Taxonomy name the host catalog uses for product categories.
pub const PRODUCT_CATEGORY_TAXONOMY: &str = "product_cat";

/// Post type the host catalog uses for products.
pub const PRODUCT_POST_TYPE: &str = "product";

/// A product category as owned by the catalog system. Never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(alias = "term_id")]
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl CategoryRecord {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: None,
            parent: None,
            count: None,
            link: None,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// A term entry as handed over by the host: a bare id, a term object, or
/// something we cannot interpret.
///
/// Term objects are kept as the host sent them so they serialize back
/// byte for byte, unknown fields included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermRef {
    Id(i64),
    Record(JsonMap<String, JsonValue>),
    Other(JsonValue),
}

impl TermRef {
    /// Category id of this entry, if it has one.
    ///
    /// Term objects are keyed by `term_id`, falling back to `id`. Numeric
    /// strings are accepted; anything else (null, fractional numbers,
    /// objects without an id) has no id and is therefore never excluded.
    pub fn id_of(&self) -> Option<i64> {
        match self {
            TermRef::Id(id) => Some(*id),
            TermRef::Record(fields) => fields
                .get("term_id")
                .or_else(|| fields.get("id"))
                .and_then(scalar_id),
            TermRef::Other(value) => scalar_id(value),
        }
    }
}

fn scalar_id(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(number) => number.as_i64(),
        JsonValue::String(raw) => raw.trim().parse::<i64>().ok(),
        _ => None,
    }
}

impl From<i64> for TermRef {
    fn from(id: i64) -> Self {
        TermRef::Id(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryOrder {
    Name,
    /// Same order as the `include` list.
    Include,
}

impl CategoryOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryOrder::Name => "name",
            CategoryOrder::Include => "include",
        }
    }
}

/// Filter options for a category listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryQuery {
    pub include: Option<Vec<i64>>,
    pub hide_empty: bool,
    pub order_by: CategoryOrder,
}

impl CategoryQuery {
    /// Every category, empty ones included, sorted by name.
    pub fn all_by_name() -> Self {
        Self {
            include: None,
            hide_empty: false,
            order_by: CategoryOrder::Name,
        }
    }

    /// Only the given categories, in the given order.
    pub fn including(ids: &[i64]) -> Self {
        Self {
            include: Some(ids.to_vec()),
            hide_empty: false,
            order_by: CategoryOrder::Include,
        }
    }
}
