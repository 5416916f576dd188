use super::error::ExclusionServiceError;
use super::model::ExcludedCategorySet;
use crate::infrastructure::repositories::OptionStore;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Option key the excluded category ids are stored under.
pub const EXCLUDED_IDS_OPTION: &str = "category_exclusions.excluded_ids";

/// Lets other code adjust the excluded set every time it is read.
pub trait ExcludedIdsAdjuster: Send + Sync {
    fn adjust(&self, excluded: ExcludedCategorySet) -> ExcludedCategorySet;
}

/// Adds a fixed list of ids to whatever is stored.
pub struct PinnedExclusions {
    ids: Vec<i64>,
}

impl PinnedExclusions {
    pub fn new(ids: Vec<i64>) -> Self {
        Self { ids }
    }
}

impl ExcludedIdsAdjuster for PinnedExclusions {
    fn adjust(&self, excluded: ExcludedCategorySet) -> ExcludedCategorySet {
        excluded.iter().chain(self.ids.iter().copied()).collect()
    }
}

pub struct ExclusionStore {
    option_store: Arc<dyn OptionStore>,
    adjusters: Vec<Arc<dyn ExcludedIdsAdjuster>>,
}

impl ExclusionStore {
    pub fn new(option_store: Arc<dyn OptionStore>) -> Self {
        Self {
            option_store,
            adjusters: Vec::new(),
        }
    }

    /// Register an adjuster. Adjusters run in registration order.
    pub fn with_adjuster(mut self, adjuster: Arc<dyn ExcludedIdsAdjuster>) -> Self {
        self.adjusters.push(adjuster);
        self
    }

    fn adjusted(&self, excluded: ExcludedCategorySet) -> ExcludedCategorySet {
        self.adjusters
            .iter()
            .fold(excluded, |set, adjuster| adjuster.adjust(set))
    }
}

#[async_trait]
pub trait ExclusionStoreApi: Send + Sync {
    /// Current excluded set, after every registered adjuster ran. Empty when
    /// nothing was ever saved or the store cannot be read and no adjuster
    /// adds ids.
    async fn get_excluded(&self) -> ExcludedCategorySet;

    /// Normalize `raw` and store it as the complete new set.
    ///
    /// Returns the set that was actually stored.
    async fn set_excluded(
        &self,
        raw: Vec<JsonValue>,
    ) -> Result<ExcludedCategorySet, ExclusionServiceError>;
}

#[async_trait]
impl ExclusionStoreApi for ExclusionStore {
    async fn get_excluded(&self) -> ExcludedCategorySet {
        let stored = match self.option_store.get(EXCLUDED_IDS_OPTION).await {
            Ok(value) => value.unwrap_or_else(|| JsonValue::Array(Vec::new())),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read excluded categories, using empty set");
                return self.adjusted(ExcludedCategorySet::new());
            }
        };

        let excluded = match stored {
            JsonValue::Array(items) => ExcludedCategorySet::from_raw(&items),
            other => ExcludedCategorySet::from_raw(std::iter::once(&other)),
        };
        self.adjusted(excluded)
    }

    async fn set_excluded(
        &self,
        raw: Vec<JsonValue>,
    ) -> Result<ExcludedCategorySet, ExclusionServiceError> {
        let excluded = ExcludedCategorySet::from_raw(&raw);

        let accepted = self
            .option_store
            .set(EXCLUDED_IDS_OPTION, excluded.to_json(), false)
            .await?;

        if !accepted {
            return Err(ExclusionServiceError::WriteRejected(
                EXCLUDED_IDS_OPTION.to_string(),
            ));
        }

        tracing::info!(
            submitted = raw.len(),
            stored = excluded.len(),
            excluded_ids = ?excluded.as_slice(),
            "Excluded categories saved"
        );

        Ok(excluded)
    }
}
