use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::domain::auth::{JwtManager, MANAGE_CATALOG};
use crate::error::{AppError, AppResult, HtmlError};

/// Cookie the admin page reads the access token from when no header is sent.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Actor context injected into request extensions after authorization
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub subject: String,
    pub email: String,
}

fn bearer_token(headers: &HeaderMap) -> AppResult<Option<String>> {
    let Some(auth_header) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return Ok(None);
    };

    match auth_header.strip_prefix("Bearer ") {
        Some(token) => Ok(Some(token.trim().to_string())),
        None => Err(AppError::Unauthorized(
            "Invalid authorization format".to_string(),
        )),
    }
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == ACCESS_TOKEN_COOKIE)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
}

/// Resolve the acting admin from the request headers.
///
/// Missing or invalid credentials are `Unauthorized`; a valid token without
/// the catalog management capability is `Forbidden`.
pub fn authorize_admin(headers: &HeaderMap, jwt_manager: &JwtManager) -> AppResult<AdminUser> {
    let token = match bearer_token(headers)? {
        Some(token) => token,
        None => cookie_token(headers)
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?,
    };

    let claims = jwt_manager.validate_token(&token)?;

    if !claims.can(MANAGE_CATALOG) {
        tracing::warn!(subject = %claims.sub, "Admin access denied: missing capability");
        return Err(AppError::Forbidden(format!(
            "Missing capability {}",
            MANAGE_CATALOG
        )));
    }

    Ok(AdminUser {
        subject: claims.sub,
        email: claims.email,
    })
}

/// Authorization middleware for the JSON admin API
pub async fn admin_auth_middleware(
    State(jwt_manager): State<Arc<JwtManager>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let admin = authorize_admin(request.headers(), &jwt_manager)?;
    request.extensions_mut().insert(admin);
    Ok(next.run(request).await)
}

/// Authorization middleware for the browser admin page; failures render an HTML page
pub async fn admin_page_auth_middleware(
    State(jwt_manager): State<Arc<JwtManager>>,
    mut request: Request,
    next: Next,
) -> Result<Response, HtmlError> {
    let admin = authorize_admin(request.headers(), &jwt_manager)?;
    request.extensions_mut().insert(admin);
    Ok(next.run(request).await)
}
