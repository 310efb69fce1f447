use axum::{Json, extract::State};
use tracing::instrument;

use crate::attendance::AttendanceService;
use crate::error::{AppError, ErrorBody};
use crate::extractors::role::CurrentRole;
use crate::models::admin::AdminDashboard;
use crate::role::ADMIN_PAGE_DENIED;
use crate::state::AppState;
use crate::utils::date;

#[utoipa::path(
    get,
    path = "/admin-dashboard/",
    tag = "Admin",
    operation_id = "adminDashboard",
    summary = "School-wide counters for today",
    description = "Student and teacher totals, how many teachers checked in today, how many classrooms had their roll submitted today, and the 10 most recent complaints. Read-only.",
    responses(
        (status = 200, description = "Dashboard", body = AdminDashboard),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not a superuser (FORBIDDEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, role), fields(user_id = role.user().id))]
pub async fn dashboard(
    CurrentRole(role): CurrentRole,
    State(state): State<AppState>,
) -> Result<Json<AdminDashboard>, AppError> {
    role.require_superuser(ADMIN_PAGE_DENIED)?;
    let today = date::today();

    let overview = AttendanceService::new(&state.db)
        .admin_overview(today)
        .await?;

    Ok(Json(AdminDashboard::new(today, overview)))
}
