use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Absent means the exclusion list lives in process memory only.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub csrf_secret: String,
    pub csrf_token_ttl_minutes: i64,
    /// Always excluded on top of the stored set.
    pub pinned_excluded_ids: Vec<i64>,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Catalog API
    pub catalog_api_url: String,
    pub catalog_api_key: Option<String>,
    pub storefront_url: Option<String>,
    pub catalog_timeout_secs: u64,
    pub catalog_cache_enabled: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET")?;

        let config = Config {
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            csrf_secret: env::var("CSRF_SECRET").unwrap_or_else(|_| jwt_secret.clone()),
            jwt_secret,
            csrf_token_ttl_minutes: env::var("CSRF_TOKEN_TTL_MINUTES")
                .unwrap_or_else(|_| "60".to_string())
                .parse()?,
            pinned_excluded_ids: parse_id_list(
                &env::var("PINNED_EXCLUDED_CATEGORY_IDS").unwrap_or_default(),
            )?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            catalog_api_url: env::var("CATALOG_API_URL")?,
            catalog_api_key: env::var("CATALOG_API_KEY").ok().filter(|v| !v.is_empty()),
            storefront_url: env::var("STOREFRONT_URL").ok().filter(|v| !v.is_empty()),
            catalog_timeout_secs: env::var("CATALOG_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            catalog_cache_enabled: env::var("CATALOG_CACHE_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .parse::<String>()
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
        };

        Ok(config)
    }
}

fn parse_id_list(raw: &str) -> Result<Vec<i64>, std::num::ParseIntError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}
