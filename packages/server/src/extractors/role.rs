use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::role::{Role, resolve_role};
use crate::state::AppState;

/// Resolves the caller's [`Role`] once per request.
///
/// Rejects with `TOKEN_MISSING`/`TOKEN_INVALID` when the caller is not
/// authenticated, or when the token's user no longer exists.
pub struct CurrentRole(pub Role);

impl FromRequestParts<AppState> for CurrentRole {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        let role = resolve_role(&state.db, auth_user.user_id)
            .await?
            .ok_or(AppError::TokenInvalid)?;

        Ok(CurrentRole(role))
    }
}
