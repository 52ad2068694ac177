//! Authentication middleware layer for protecting routes.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::state::AppState;

use super::jwt;
use super::types::{AuthConfig, AuthUser};

/// Middleware function that requires a verified provider token.
///
/// Used with `axum::middleware::from_fn_with_state`; on success the caller's
/// `AuthUser` is available to handlers as an `Extension`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match extract_auth_user(request.headers(), &state.auth_config) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

/// Extract and validate the caller from request headers.
///
/// The bearer header wins over the provider session cookie.
pub fn extract_auth_user(headers: &HeaderMap, config: &AuthConfig) -> Result<AuthUser, ApiError> {
    let token = extract_token_from_header(headers)
        .or_else(|| extract_token_from_cookie(headers, &config.cookie_name))
        .ok_or_else(|| ApiError::unauthorized("Missing authentication"))?;

    let claims = jwt::validate_token(config, &token).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        ApiError::unauthorized("Invalid or expired token")
    })?;

    if claims.sub.is_empty() {
        return Err(ApiError::unauthorized("Token has no subject"));
    }

    Ok(AuthUser {
        external_id: claims.sub,
    })
}

fn extract_token_from_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;

    cookie::Cookie::split_parse(cookie_header)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == cookie_name)
        .map(|cookie| cookie.value().to_string())
}

fn extract_token_from_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
