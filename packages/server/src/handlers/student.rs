use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use sea_orm::ConnectionTrait;
use tracing::instrument;

use crate::attendance::AttendanceService;
use crate::entity::{student, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::body::AppForm;
use crate::extractors::role::CurrentRole;
use crate::models::student::*;
use crate::role::STUDENT_PAGE_DENIED;
use crate::state::AppState;
use crate::utils::date;

async fn build_dashboard<C: ConnectionTrait>(
    service: &AttendanceService<'_, C>,
    user: &user::Model,
    student: &student::Model,
    form: ComplaintFormView,
) -> Result<StudentDashboard, AppError> {
    let summary = service.student_summary(student).await?;
    let complaints = service.student_complaints(student).await?;
    let classroom = service.classroom(Some(student.classroom_id)).await?;

    Ok(StudentDashboard {
        student: StudentView::new(user, student, classroom.as_ref()),
        attendance_records: summary
            .records
            .into_iter()
            .map(AttendanceRecordView::from)
            .collect(),
        total_days: summary.total_days,
        present_days: summary.present_days,
        attendance_percentage: summary.percentage,
        complaints: complaints.into_iter().map(ComplaintView::from).collect(),
        form,
    })
}

#[utoipa::path(
    get,
    path = "/student/",
    tag = "Student",
    operation_id = "studentDashboard",
    summary = "Student dashboard",
    description = "The student's attendance history (newest first), totals and percentage, their complaints, and an empty complaint form.",
    responses(
        (status = 200, description = "Dashboard", body = StudentDashboard),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not a student (FORBIDDEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, role), fields(user_id = role.user().id))]
pub async fn dashboard(
    CurrentRole(role): CurrentRole,
    State(state): State<AppState>,
) -> Result<Json<StudentDashboard>, AppError> {
    let (user, student) = role.require_student(STUDENT_PAGE_DENIED)?;
    let service = AttendanceService::new(&state.db);

    let dashboard = build_dashboard(&service, &user, &student, ComplaintFormView::default()).await?;
    Ok(Json(dashboard))
}

#[utoipa::path(
    post,
    path = "/student/",
    tag = "Student",
    operation_id = "submitComplaint",
    summary = "File a complaint",
    description = "Stores a complaint dated today and redirects back to `/student/`. A blank message stores nothing and returns the dashboard with the form's field errors.",
    request_body(content = ComplaintForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Filed; redirect to `/student/`"),
        (status = 400, description = "Blank message; dashboard with form errors", body = StudentDashboard),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not a student (FORBIDDEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, role, form), fields(user_id = role.user().id))]
pub async fn submit_complaint(
    CurrentRole(role): CurrentRole,
    State(state): State<AppState>,
    form: Result<AppForm<ComplaintForm>, AppError>,
) -> Result<Response, AppError> {
    let (user, student) = role.require_student(STUDENT_PAGE_DENIED)?;
    let AppForm(form) = form?;
    let service = AttendanceService::new(&state.db);

    match validate_complaint(form) {
        Ok(message) => {
            service
                .file_complaint(&student, date::today(), message)
                .await?;
            Ok(Redirect::to("/student/").into_response())
        }
        Err(form) => {
            tracing::debug!(student_id = student.id, "Rejected blank complaint");
            let dashboard = build_dashboard(&service, &user, &student, form).await?;
            Ok((StatusCode::BAD_REQUEST, Json(dashboard)).into_response())
        }
    }
}
