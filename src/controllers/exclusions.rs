use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::domain::auth::{CsrfManager, SAVE_EXCLUSIONS_ACTION};
use crate::domain::exclusions::{
    ExclusionStore, ExclusionStoreApi, ExclusionsResponse, SaveExclusionsRequest,
};
use crate::error::{AppError, AppResult};
use crate::infrastructure::auth::AdminUser;

/// Checks a save submission before anything is normalized or stored.
pub fn verify_submission(
    csrf: &CsrfManager,
    admin: &AdminUser,
    action: &str,
    token: Option<&str>,
) -> AppResult<()> {
    if action != SAVE_EXCLUSIONS_ACTION {
        return Err(AppError::BadRequest(format!("Unknown action '{}'", action)));
    }

    csrf.validate(token, SAVE_EXCLUSIONS_ACTION, &admin.subject)
        .map_err(|e| {
            tracing::warn!(subject = %admin.subject, error = %e, "Rejected exclusions save");
            AppError::from(e)
        })
}

pub struct ExclusionController {
    exclusion_store: Arc<ExclusionStore>,
    csrf: Arc<CsrfManager>,
}

impl ExclusionController {
    pub fn new(exclusion_store: Arc<ExclusionStore>, csrf: Arc<CsrfManager>) -> Self {
        Self {
            exclusion_store,
            csrf,
        }
    }

    /// GET /api/admin/exclusions - Current set plus a token for the next save
    pub async fn get_exclusions(
        State(controller): State<Arc<ExclusionController>>,
        Extension(admin): Extension<AdminUser>,
    ) -> AppResult<Json<ExclusionsResponse>> {
        let excluded_ids = controller.exclusion_store.get_excluded().await;
        let csrf_token = controller
            .csrf
            .generate(SAVE_EXCLUSIONS_ACTION, &admin.subject);

        Ok(Json(ExclusionsResponse {
            excluded_ids,
            csrf_token: Some(csrf_token),
        }))
    }

    /// PUT /api/admin/exclusions - Replace the excluded set
    pub async fn save_exclusions(
        State(controller): State<Arc<ExclusionController>>,
        Extension(admin): Extension<AdminUser>,
        Json(request): Json<SaveExclusionsRequest>,
    ) -> AppResult<Json<ExclusionsResponse>> {
        verify_submission(
            &controller.csrf,
            &admin,
            &request.action,
            request.csrf_token.as_deref(),
        )?;

        let excluded_ids = controller
            .exclusion_store
            .set_excluded(request.excluded_ids)
            .await?;

        tracing::info!(
            subject = %admin.subject,
            count = excluded_ids.len(),
            "Exclusions saved via API"
        );

        Ok(Json(ExclusionsResponse {
            excluded_ids,
            csrf_token: Some(
                controller
                    .csrf
                    .generate(SAVE_EXCLUSIONS_ACTION, &admin.subject),
            ),
        }))
    }
}
