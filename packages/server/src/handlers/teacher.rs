use std::collections::HashMap;

use axum::{Json, extract::State, response::Redirect};
use tracing::instrument;

use crate::attendance::AttendanceService;
use crate::error::{AppError, ErrorBody};
use crate::extractors::body::AppForm;
use crate::extractors::role::CurrentRole;
use crate::models::teacher::*;
use crate::role::{MARK_ATTENDANCE_DENIED, TEACHER_PAGE_DENIED};
use crate::state::AppState;
use crate::utils::date;

#[utoipa::path(
    get,
    path = "/teacher/",
    tag = "Teacher",
    operation_id = "teacherDashboard",
    summary = "Teacher dashboard",
    description = "Checks the teacher in for today on the first visit of the day (later visits reuse that record unchanged) and reports whether the teacher's classroom roll has been submitted today.",
    responses(
        (status = 200, description = "Dashboard", body = TeacherDashboard),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not a teacher (FORBIDDEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, role), fields(user_id = role.user().id))]
pub async fn dashboard(
    CurrentRole(role): CurrentRole,
    State(state): State<AppState>,
) -> Result<Json<TeacherDashboard>, AppError> {
    let (user, teacher) = role.require_teacher(TEACHER_PAGE_DENIED)?;
    let today = date::today();
    let service = AttendanceService::new(&state.db);

    let (checkin, _created) = service.check_in(&teacher, today).await?;
    let class_marked_today = service.class_marked_on(teacher.classroom_id, today).await?;
    let classroom = service.classroom(teacher.classroom_id).await?;

    Ok(Json(TeacherDashboard {
        teacher: TeacherView::new(&user, &teacher, classroom.as_ref()),
        teacher_checkin: checkin.into(),
        class_marked_today,
    }))
}

#[utoipa::path(
    get,
    path = "/teacher/mark/",
    tag = "Teacher",
    operation_id = "markAttendanceForm",
    summary = "Roll-call form",
    description = "Lists the students of the teacher's classroom with the checkbox field to submit for each.",
    responses(
        (status = 200, description = "Roster", body = MarkAttendancePage),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not a teacher (FORBIDDEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, role), fields(user_id = role.user().id))]
pub async fn mark_attendance_form(
    CurrentRole(role): CurrentRole,
    State(state): State<AppState>,
) -> Result<Json<MarkAttendancePage>, AppError> {
    let (user, teacher) = role.require_teacher(MARK_ATTENDANCE_DENIED)?;
    let service = AttendanceService::new(&state.db);

    let students = service.class_roster(teacher.classroom_id).await?;
    let classroom = service.classroom(teacher.classroom_id).await?;

    Ok(Json(MarkAttendancePage {
        teacher: TeacherView::new(&user, &teacher, classroom.as_ref()),
        date: date::today(),
        students: students.into_iter().map(RosterStudent::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/teacher/mark/",
    tag = "Teacher",
    operation_id = "submitMarkAttendance",
    summary = "Submit the class roll",
    description = "Records today's attendance for every student in the teacher's classroom. A student is present iff `present_<student_id>=on` was submitted. Resubmitting overwrites today's records.",
    request_body(content = HashMap<String, String>, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Recorded; redirect to `/teacher/`"),
        (status = 400, description = "Unparseable form (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not a teacher (FORBIDDEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, role, form), fields(user_id = role.user().id))]
pub async fn submit_mark_attendance(
    CurrentRole(role): CurrentRole,
    State(state): State<AppState>,
    form: Result<AppForm<HashMap<String, String>>, AppError>,
) -> Result<Redirect, AppError> {
    let (_, teacher) = role.require_teacher(MARK_ATTENDANCE_DENIED)?;
    let AppForm(form) = form?;
    let present_ids = parse_roll_call(&form);

    AttendanceService::new(&state.db)
        .record_roll_call(&teacher, date::today(), &present_ids)
        .await?;

    Ok(Redirect::to("/teacher/"))
}
