use axum::response::Redirect;
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::role::CurrentRole;
use crate::role::LOGIN_PATH;

#[utoipa::path(
    get,
    path = "/",
    tag = "Dashboards",
    operation_id = "home",
    summary = "Redirect to the caller's dashboard",
    description = "Superusers go to `/admin-dashboard/`, teachers to `/teacher/`, students to `/student/`. Unauthenticated callers and accounts with no role go to the login page.",
    responses((status = 303, description = "Redirect to the role's dashboard or the login page")),
)]
#[instrument(skip(role))]
pub async fn home(role: Result<CurrentRole, AppError>) -> Result<Redirect, AppError> {
    match role {
        Ok(CurrentRole(role)) => Ok(Redirect::to(role.home_path())),
        Err(AppError::TokenMissing | AppError::TokenInvalid) => Ok(Redirect::to(LOGIN_PATH)),
        Err(e) => Err(e),
    }
}
