use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{classroom, complaint, student, student_attendance, user};

pub const REQUIRED_FIELD: &str = "This field is required.";

#[derive(Serialize, utoipa::ToSchema)]
pub struct StudentView {
    pub id: i32,
    #[schema(example = "s1")]
    pub username: String,
    #[schema(example = "12")]
    pub roll_number: String,
    pub classroom_id: i32,
    #[schema(example = "10A")]
    pub classroom_name: Option<String>,
}

impl StudentView {
    pub fn new(u: &user::Model, s: &student::Model, classroom: Option<&classroom::Model>) -> Self {
        Self {
            id: s.id,
            username: u.username.clone(),
            roll_number: s.roll_number.clone(),
            classroom_id: s.classroom_id,
            classroom_name: classroom.map(|c| c.name.clone()),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AttendanceRecordView {
    pub date: NaiveDate,
    pub present: bool,
    pub marked_by_teacher: bool,
    pub classroom_id: i32,
}

impl From<student_attendance::Model> for AttendanceRecordView {
    fn from(m: student_attendance::Model) -> Self {
        Self {
            date: m.date,
            present: m.present,
            marked_by_teacher: m.marked_by_teacher,
            classroom_id: m.classroom_id,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ComplaintView {
    pub id: i32,
    pub date: NaiveDate,
    pub message: String,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<complaint::Model> for ComplaintView {
    fn from(m: complaint::Model) -> Self {
        Self {
            id: m.id,
            date: m.date,
            message: m.message,
            resolved: m.resolved,
            created_at: m.created_at,
        }
    }
}

/// Submitted complaint form. A missing `message` field deserializes as empty.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct ComplaintForm {
    #[serde(default)]
    #[schema(example = "The projector in 10A was broken today.")]
    pub message: String,
}

/// The complaint form as shown to the student: the current value plus any
/// per-field errors from the last submission.
#[derive(Debug, Serialize, Default, utoipa::ToSchema)]
pub struct ComplaintFormView {
    pub message: String,
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Validate a complaint submission, returning the message to store.
///
/// Surrounding whitespace is stripped; a blank message is rejected with a
/// field error instead of being stored.
pub fn validate_complaint(form: ComplaintForm) -> Result<String, ComplaintFormView> {
    let message = form.message.trim();
    if message.is_empty() {
        return Err(ComplaintFormView {
            message: form.message,
            errors: BTreeMap::from([("message".to_string(), vec![REQUIRED_FIELD.to_string()])]),
        });
    }
    Ok(message.to_string())
}

/// View-model for `/student/`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StudentDashboard {
    pub student: StudentView,
    /// Newest first.
    pub attendance_records: Vec<AttendanceRecordView>,
    pub total_days: u64,
    pub present_days: u64,
    #[schema(example = 75.0)]
    pub attendance_percentage: f64,
    /// Newest first.
    pub complaints: Vec<ComplaintView>,
    pub form: ComplaintFormView,
}
