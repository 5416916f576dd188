use super::option_repository::OptionStore;
use crate::error::AppResult;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredOption {
    value: JsonValue,
    autoload: bool,
}

/// Process-local option store, used when no database is configured and in tests.
#[derive(Default)]
pub struct MemoryOptionRepository {
    options: RwLock<BTreeMap<String, StoredOption>>,
}

impl MemoryOptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Autoload flag of a stored option, `None` if the key was never written
    pub async fn autoload_of(&self, key: &str) -> Option<bool> {
        self.options.read().await.get(key).map(|o| o.autoload)
    }
}

#[async_trait]
impl OptionStore for MemoryOptionRepository {
    async fn get(&self, key: &str) -> AppResult<Option<JsonValue>> {
        Ok(self.options.read().await.get(key).map(|o| o.value.clone()))
    }

    async fn set(&self, key: &str, value: JsonValue, autoload: bool) -> AppResult<bool> {
        self.options
            .write()
            .await
            .insert(key.to_string(), StoredOption { value, autoload });
        Ok(true)
    }

    async fn autoloaded(&self) -> AppResult<Vec<(String, JsonValue)>> {
        Ok(self
            .options
            .read()
            .await
            .iter()
            .filter(|(_, option)| option.autoload)
            .map(|(key, option)| (key.clone(), option.value.clone()))
            .collect())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
