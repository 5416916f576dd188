use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashSet;

use super::normalize::normalize_ids;

/// Ordered set of excluded category ids.
///
/// Every element is positive and appears once; order is first-seen order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "Vec<i64>", from = "Vec<i64>")]
pub struct ExcludedCategorySet {
    ids: Vec<i64>,
    lookup: HashSet<i64>,
}

impl ExcludedCategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary submitted values (integer-cast, positive, unique).
    pub fn from_raw<'a, I>(raw: I) -> Self
    where
        I: IntoIterator<Item = &'a JsonValue>,
    {
        let ids = normalize_ids(raw);
        let lookup = ids.iter().copied().collect();
        Self { ids, lookup }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.lookup.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied()
    }

    pub fn to_json(&self) -> JsonValue {
        JsonValue::from(self.ids.clone())
    }
}

impl PartialEq for ExcludedCategorySet {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl Eq for ExcludedCategorySet {}

impl From<Vec<i64>> for ExcludedCategorySet {
    fn from(ids: Vec<i64>) -> Self {
        let raw: Vec<JsonValue> = ids.into_iter().map(JsonValue::from).collect();
        Self::from_raw(&raw)
    }
}

impl From<ExcludedCategorySet> for Vec<i64> {
    fn from(set: ExcludedCategorySet) -> Self {
        set.ids
    }
}

impl FromIterator<i64> for ExcludedCategorySet {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}
