use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Name of the cookie carrying the session JWT.
pub const SESSION_COOKIE: &str = "session";

/// Authenticated identity extracted from the `Authorization: Bearer <token>`
/// header, or from the `session` cookie when no header is present.
///
/// This only proves who the caller is. Use [`crate::role::Role`] to find
/// out what they may do.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
}

fn bearer_token(parts: &Parts) -> Option<Result<String, AppError>> {
    let header = parts.headers.get("Authorization")?;
    let token = header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned)
        .ok_or(AppError::TokenInvalid);
    Some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match bearer_token(parts) {
            Some(token) => token?,
            None => CookieJar::from_headers(&parts.headers)
                .get(SESSION_COOKIE)
                .map(|c| c.value().to_owned())
                .ok_or(AppError::TokenMissing)?,
        };

        let claims =
            jwt::verify(&token, &state.config.auth.jwt_secret).map_err(|_| AppError::TokenInvalid)?;

        Ok(AuthUser { user_id: claims.uid })
    }
}
