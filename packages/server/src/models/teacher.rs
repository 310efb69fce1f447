use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::attendance::RosterEntry;
use crate::entity::{classroom, teacher, teacher_attendance, user};

/// Form field prefix for a student's roll-call checkbox: `present_<student_id>`.
pub const PRESENT_FIELD_PREFIX: &str = "present_";

/// Value browsers send for a ticked checkbox.
const CHECKED: &str = "on";

#[derive(Serialize, utoipa::ToSchema)]
pub struct TeacherView {
    pub id: i32,
    #[schema(example = "t1")]
    pub username: String,
    #[schema(example = "Physics")]
    pub subject: String,
    pub classroom_id: Option<i32>,
    #[schema(example = "10A")]
    pub classroom_name: Option<String>,
}

impl TeacherView {
    pub fn new(u: &user::Model, t: &teacher::Model, classroom: Option<&classroom::Model>) -> Self {
        Self {
            id: t.id,
            username: u.username.clone(),
            subject: t.subject.clone(),
            classroom_id: t.classroom_id,
            classroom_name: classroom.map(|c| c.name.clone()),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CheckinView {
    pub date: NaiveDate,
    pub present: bool,
    pub classroom_id: Option<i32>,
    /// When the check-in was first recorded.
    pub timestamp: DateTime<Utc>,
}

impl From<teacher_attendance::Model> for CheckinView {
    fn from(m: teacher_attendance::Model) -> Self {
        Self {
            date: m.date,
            present: m.present,
            classroom_id: m.classroom_id,
            timestamp: m.created_at,
        }
    }
}

/// View-model for `GET /teacher/`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TeacherDashboard {
    pub teacher: TeacherView,
    pub teacher_checkin: CheckinView,
    /// Whether this teacher's classroom roll has been submitted today.
    pub class_marked_today: bool,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RosterStudent {
    pub id: i32,
    #[schema(example = "s1")]
    pub username: String,
    #[schema(example = "12")]
    pub roll_number: String,
    /// Name of the checkbox to tick when submitting the roll.
    #[schema(example = "present_3")]
    pub field: String,
}

impl From<RosterEntry> for RosterStudent {
    fn from(entry: RosterEntry) -> Self {
        Self {
            id: entry.student.id,
            field: format!("{PRESENT_FIELD_PREFIX}{}", entry.student.id),
            username: entry.username,
            roll_number: entry.student.roll_number,
        }
    }
}

/// View-model for `GET /teacher/mark/`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MarkAttendancePage {
    pub teacher: TeacherView,
    pub date: NaiveDate,
    pub students: Vec<RosterStudent>,
}

/// Collect the ids of students ticked present in a submitted roll-call form.
///
/// Only `present_<id>=on` counts; any other value, or a missing field,
/// means absent. Unrelated fields are ignored.
pub fn parse_roll_call(form: &HashMap<String, String>) -> HashSet<i32> {
    form.iter()
        .filter(|(_, value)| value.as_str() == CHECKED)
        .filter_map(|(key, _)| key.strip_prefix(PRESENT_FIELD_PREFIX)?.parse().ok())
        .collect()
}
