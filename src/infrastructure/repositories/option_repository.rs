use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Key-value persistence for named options.
///
/// Each option carries an `autoload` flag: autoloaded options are read in bulk
/// when the process starts, the rest only when someone asks for them.
#[async_trait]
pub trait OptionStore: Send + Sync {
    /// Fetch an option value, `None` if it was never saved
    async fn get(&self, key: &str) -> AppResult<Option<JsonValue>>;

    /// Replace an option value. Returns whether the store accepted the write.
    async fn set(&self, key: &str, value: JsonValue, autoload: bool) -> AppResult<bool>;

    /// All options flagged for eager loading
    async fn autoloaded(&self) -> AppResult<Vec<(String, JsonValue)>>;

    /// Check the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

fn autoload_flag(autoload: bool) -> &'static str {
    if autoload {
        "on"
    } else {
        "off"
    }
}

pub struct PgOptionRepository {
    pool: Arc<DbPool>,
}

impl PgOptionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OptionStore for PgOptionRepository {
    async fn get(&self, key: &str) -> AppResult<Option<JsonValue>> {
        let pool = self.pool.as_ref();
        let value = sqlx::query_scalar::<_, JsonValue>(
            r#"
            SELECT option_value
            FROM options
            WHERE option_name = $1
            "#,
        )
        .bind(key)
        .fetch_optional(pool)
        .await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: JsonValue, autoload: bool) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO options (option_name, option_value, autoload, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (option_name)
            DO UPDATE SET
                option_value = EXCLUDED.option_value,
                autoload = EXCLUDED.autoload,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(key)
        .bind(&value)
        .bind(autoload_flag(autoload))
        .bind(now)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn autoloaded(&self) -> AppResult<Vec<(String, JsonValue)>> {
        let pool = self.pool.as_ref();
        let rows = sqlx::query_as::<_, (String, JsonValue)>(
            r#"
            SELECT option_name, option_value
            FROM options
            WHERE autoload = 'on'
            ORDER BY option_name
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn ping(&self) -> AppResult<()> {
        crate::infrastructure::db::check_connection(&self.pool).await?;
        Ok(())
    }
}
