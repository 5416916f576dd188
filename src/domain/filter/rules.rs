//! The exclusion filter itself.
//!
//! Every function here returns the entries of its input that are not in the
//! excluded set, in their original order and multiplicity. None of them touch
//! the catalog; they only prune the collection they are given.

use crate::domain::catalog::{CategoryRecord, TermRef, PRODUCT_CATEGORY_TAXONOMY, PRODUCT_POST_TYPE};
use crate::domain::exclusions::normalize::coerce_to_int;
use crate::domain::exclusions::ExcludedCategorySet;
use serde_json::Value as JsonValue;

pub fn filter_ids(ids: &[i64], excluded: &ExcludedCategorySet) -> Vec<i64> {
    if excluded.is_empty() {
        return ids.to_vec();
    }
    ids.iter().copied().filter(|id| !excluded.contains(*id)).collect()
}

pub fn filter_records(
    records: Vec<CategoryRecord>,
    excluded: &ExcludedCategorySet,
) -> Vec<CategoryRecord> {
    if excluded.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| !excluded.contains(record.id))
        .collect()
}

/// Entries without a usable id are kept.
pub fn filter_terms(terms: Vec<TermRef>, excluded: &ExcludedCategorySet) -> Vec<TermRef> {
    if excluded.is_empty() {
        return terms;
    }
    terms
        .into_iter()
        .filter(|term| term.id_of().map_or(true, |id| !excluded.contains(id)))
        .collect()
}

/// Filter the terms of one entity, but only for product categories of a product.
pub fn filter_terms_for_entity(
    terms: Vec<TermRef>,
    entity_post_type: Option<&str>,
    taxonomy: &str,
    excluded: &ExcludedCategorySet,
) -> Vec<TermRef> {
    if taxonomy != PRODUCT_CATEGORY_TAXONOMY || entity_post_type != Some(PRODUCT_POST_TYPE) {
        return terms;
    }
    filter_terms(terms, excluded)
}

/// Whether an object-terms lookup asked for product categories.
pub fn requests_product_categories<S: AsRef<str>>(taxonomies: &[S]) -> bool {
    taxonomies
        .iter()
        .any(|taxonomy| taxonomy.as_ref() == PRODUCT_CATEGORY_TAXONOMY)
}

/// Object id whose type decides an object-terms lookup, if any.
///
/// Only the first entry counts. It is integer-cast, and zero means there is
/// nothing to check.
pub fn leading_object_id(object_ids: &[JsonValue]) -> Option<i64> {
    object_ids.first().map(coerce_to_int).filter(|id| *id != 0)
}
