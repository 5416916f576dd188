pub mod error;
pub mod model;
pub mod normalize;
pub mod service;

pub use error::ExclusionServiceError;
pub use model::ExcludedCategorySet;
pub use service::{
    ExcludedIdsAdjuster, ExclusionStore, ExclusionStoreApi, PinnedExclusions, EXCLUDED_IDS_OPTION,
};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Response for the exclusions admin API
#[derive(Debug, Serialize, Deserialize)]
pub struct ExclusionsResponse {
    pub excluded_ids: ExcludedCategorySet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
}

/// Request to replace the excluded set
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveExclusionsRequest {
    pub action: String,
    #[serde(default)]
    pub csrf_token: Option<String>,
    #[serde(default)]
    pub excluded_ids: Vec<JsonValue>,
}
