use axum::{
    body::Bytes,
    extract::{Query, State},
    response::{Html, Redirect},
    Extension,
};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::controllers::exclusions::verify_submission;
use crate::domain::auth::{CsrfManager, SAVE_EXCLUSIONS_ACTION};
use crate::domain::catalog::{CategoryQuery, CategoryRecord};
use crate::domain::exclusions::{ExcludedCategorySet, ExclusionStore, ExclusionStoreApi};
use crate::error::{AppError, HtmlError};
use crate::infrastructure::auth::AdminUser;
use crate::infrastructure::repositories::CatalogRepository;

pub const ADMIN_PAGE_PATH: &str = "/admin/exclusions";
pub const CSRF_FIELD: &str = "_csrf_token";
pub const EXCLUDED_IDS_FIELD: &str = "excluded_ids[]";

#[derive(Debug, Default, Deserialize)]
pub struct AdminPageQuery {
    pub updated: Option<String>,
}

/// Fields of a submitted exclusions form.
#[derive(Debug, Default, PartialEq)]
pub struct ExclusionsForm {
    pub action: String,
    pub csrf_token: Option<String>,
    pub excluded_ids: Vec<JsonValue>,
}

impl ExclusionsForm {
    /// Parse an `application/x-www-form-urlencoded` body. Checkbox values
    /// repeat under `excluded_ids[]` and are kept as raw strings.
    pub fn parse(body: &[u8]) -> Self {
        let mut form = Self::default();

        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "action" => form.action = value.into_owned(),
                CSRF_FIELD => form.csrf_token = Some(value.into_owned()),
                EXCLUDED_IDS_FIELD | "excluded_ids" => {
                    form.excluded_ids.push(JsonValue::String(value.into_owned()))
                }
                _ => {}
            }
        }

        form
    }
}

pub struct AdminPageController {
    exclusion_store: Arc<ExclusionStore>,
    catalog: Arc<dyn CatalogRepository>,
    csrf: Arc<CsrfManager>,
}

impl AdminPageController {
    pub fn new(
        exclusion_store: Arc<ExclusionStore>,
        catalog: Arc<dyn CatalogRepository>,
        csrf: Arc<CsrfManager>,
    ) -> Self {
        Self {
            exclusion_store,
            catalog,
            csrf,
        }
    }

    /// GET /admin/exclusions - Settings page
    pub async fn show(
        State(controller): State<Arc<AdminPageController>>,
        Extension(admin): Extension<AdminUser>,
        Query(query): Query<AdminPageQuery>,
    ) -> Result<Html<String>, HtmlError> {
        let excluded = controller.exclusion_store.get_excluded().await;

        let categories = match controller
            .catalog
            .list_categories(&CategoryQuery::all_by_name())
            .await
        {
            Ok(categories) => Some(categories),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load categories for admin page");
                None
            }
        };

        let token = controller
            .csrf
            .generate(SAVE_EXCLUSIONS_ACTION, &admin.subject);

        Ok(Html(render_admin_page(
            categories.as_deref(),
            &excluded,
            &token,
            query.updated.as_deref() == Some("1"),
        )))
    }

    /// POST /admin/exclusions - Save handler, redirects back to the page
    pub async fn save(
        State(controller): State<Arc<AdminPageController>>,
        Extension(admin): Extension<AdminUser>,
        body: Bytes,
    ) -> Result<Redirect, HtmlError> {
        let form = ExclusionsForm::parse(&body);

        verify_submission(
            &controller.csrf,
            &admin,
            &form.action,
            form.csrf_token.as_deref(),
        )?;

        let saved = controller
            .exclusion_store
            .set_excluded(form.excluded_ids)
            .await
            .map_err(AppError::from)?;

        tracing::info!(
            subject = %admin.subject,
            count = saved.len(),
            "Exclusions saved from admin page"
        );

        Ok(Redirect::to(&format!("{}?updated=1", ADMIN_PAGE_PATH)))
    }
}

fn render_checklist(categories: Option<&[CategoryRecord]>, excluded: &ExcludedCategorySet) -> String {
    let categories = match categories {
        None => {
            return "<p class=\"description\">Unable to load product categories.</p>".to_string()
        }
        Some([]) => return "<p class=\"description\">No product categories found.</p>".to_string(),
        Some(categories) => categories,
    };

    let mut out = String::from("<div class=\"category-exclusions__checklist\">\n");
    for category in categories {
        let checked = if excluded.contains(category.id) {
            " checked=\"checked\""
        } else {
            ""
        };
        out.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"{}\" value=\"{}\"{} /> {}</label>\n",
            EXCLUDED_IDS_FIELD,
            category.id,
            checked,
            html_escape::encode_text(&category.name)
        ));
    }
    out.push_str("</div>\n");
    out.push_str(
        "<p class=\"description\">Checked categories will be excluded from the product page output.</p>",
    );
    out
}

/// Full settings page. `categories` is `None` when the catalog could not be read.
pub fn render_admin_page(
    categories: Option<&[CategoryRecord]>,
    excluded: &ExcludedCategorySet,
    csrf_token: &str,
    updated: bool,
) -> String {
    let notice = if updated {
        "<div class=\"notice notice-success\"><p>Exclusions saved.</p></div>\n"
    } else {
        ""
    };

    let current = excluded
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"><title>Product Category Exclusions</title></head>
<body>
<div class="wrap">
<h1>Product Category Exclusions</h1>
{notice}<form method="post" action="{path}">
<input type="hidden" name="action" value="{action}" />
<input type="hidden" name="{csrf_field}" value="{token}" />
{checklist}
<p class="submit"><input type="submit" class="button button-primary" value="Save Exclusions" /></p>
</form>
<hr />
<h2>Currently Excluded IDs</h2>
<code>{current}</code>
</div>
</body>
</html>"#,
        notice = notice,
        path = ADMIN_PAGE_PATH,
        action = SAVE_EXCLUSIONS_ACTION,
        csrf_field = CSRF_FIELD,
        token = html_escape::encode_double_quoted_attribute(csrf_token),
        checklist = render_checklist(categories, excluded),
        current = current,
    )
}
