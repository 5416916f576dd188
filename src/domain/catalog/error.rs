#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Request(String),
    #[error("catalog responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode catalog response: {0}")]
    Decode(String),
    #[error("no link available for category {0}")]
    LinkUnavailable(i64),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Request(err.to_string())
        }
    }
}
