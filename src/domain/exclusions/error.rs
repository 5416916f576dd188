use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ExclusionServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("option store rejected the write for {0}")]
    WriteRejected(String),
}

impl From<AppError> for ExclusionServiceError {
    fn from(err: AppError) -> Self {
        ExclusionServiceError::Dependency(err.to_string())
    }
}

impl From<ExclusionServiceError> for AppError {
    fn from(err: ExclusionServiceError) -> Self {
        match err {
            ExclusionServiceError::Dependency(msg) => AppError::Internal(msg),
            ExclusionServiceError::WriteRejected(key) => {
                AppError::Internal(format!("Failed to save option {}", key))
            }
        }
    }
}
