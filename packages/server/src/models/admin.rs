use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::attendance::{AdminOverview, RecentComplaint};

#[derive(Serialize, utoipa::ToSchema)]
pub struct RecentComplaintView {
    pub id: i32,
    #[schema(example = "s1")]
    pub username: String,
    #[schema(example = "12")]
    pub roll_number: String,
    pub date: NaiveDate,
    pub message: String,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<RecentComplaint> for RecentComplaintView {
    fn from(r: RecentComplaint) -> Self {
        Self {
            id: r.complaint.id,
            username: r.username,
            roll_number: r.roll_number,
            date: r.complaint.date,
            message: r.complaint.message,
            resolved: r.complaint.resolved,
            created_at: r.complaint.created_at,
        }
    }
}

/// View-model for `GET /admin-dashboard/`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminDashboard {
    pub today: NaiveDate,
    pub total_students: u64,
    pub total_teachers: u64,
    /// Teachers with a present check-in for `today`.
    pub teachers_checked_in_today: u64,
    /// Distinct classrooms whose roll was submitted for `today`.
    pub classes_marked_today: u64,
    /// The 10 most recently filed complaints across all students.
    pub recent_complaints: Vec<RecentComplaintView>,
}

impl AdminDashboard {
    pub fn new(today: NaiveDate, overview: AdminOverview) -> Self {
        Self {
            today,
            total_students: overview.total_students,
            total_teachers: overview.total_teachers,
            teachers_checked_in_today: overview.teachers_checked_in_today,
            classes_marked_today: overview.classes_marked_today,
            recent_complaints: overview
                .recent_complaints
                .into_iter()
                .map(RecentComplaintView::from)
                .collect(),
        }
    }
}
