use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::{debug, info};

use super::stats::attendance_percentage;
use crate::entity::{classroom, complaint, student, student_attendance, teacher, teacher_attendance, user};

/// How many complaints the admin overview lists.
pub const RECENT_COMPLAINTS_LIMIT: u64 = 10;

/// A student on a classroom roster, with the login name to display.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub student: student::Model,
    pub username: String,
}

/// A student's attendance history and derived totals.
#[derive(Debug, Clone)]
pub struct StudentSummary {
    /// Newest date first.
    pub records: Vec<student_attendance::Model>,
    pub total_days: u64,
    pub present_days: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone)]
pub struct RecentComplaint {
    pub complaint: complaint::Model,
    pub username: String,
    pub roll_number: String,
}

/// School-wide counters for one date.
#[derive(Debug, Clone)]
pub struct AdminOverview {
    pub total_students: u64,
    pub total_teachers: u64,
    pub teachers_checked_in_today: u64,
    pub classes_marked_today: u64,
    pub recent_complaints: Vec<RecentComplaint>,
}

/// Persistence access for the attendance workflows.
///
/// Every write is a single statement keyed on a unique constraint, so
/// concurrent requests for the same teacher/student and date converge on
/// one row without application-level locking.
pub struct AttendanceService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> AttendanceService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn classroom(&self, id: Option<i32>) -> Result<Option<classroom::Model>, DbErr> {
        match id {
            Some(id) => classroom::Entity::find_by_id(id).one(self.conn).await,
            None => Ok(None),
        }
    }

    /// Ensure the teacher has a check-in for `today`.
    ///
    /// The first call of the day inserts a present record tagged with the
    /// teacher's classroom; later calls return that record untouched.
    /// Returns the record and whether this call created it.
    pub async fn check_in(
        &self,
        teacher: &teacher::Model,
        today: NaiveDate,
    ) -> Result<(teacher_attendance::Model, bool), DbErr> {
        let model = teacher_attendance::ActiveModel {
            teacher_id: Set(teacher.id),
            classroom_id: Set(teacher.classroom_id),
            date: Set(today),
            present: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let result = teacher_attendance::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    teacher_attendance::Column::TeacherId,
                    teacher_attendance::Column::Date,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await;

        let created = match result {
            Ok(rows) => rows > 0,
            Err(DbErr::RecordNotInserted) => false,
            Err(e) => return Err(e),
        };

        let checkin = teacher_attendance::Entity::find()
            .filter(teacher_attendance::Column::TeacherId.eq(teacher.id))
            .filter(teacher_attendance::Column::Date.eq(today))
            .one(self.conn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("teacher_attendance missing after upsert".into()))?;

        if created {
            info!(teacher_id = teacher.id, %today, "Teacher checked in");
        } else {
            debug!(teacher_id = teacher.id, %today, "Reusing existing check-in");
        }

        Ok((checkin, created))
    }

    /// Whether a teacher has submitted the roll for this classroom on `date`.
    pub async fn class_marked_on(
        &self,
        classroom_id: Option<i32>,
        date: NaiveDate,
    ) -> Result<bool, DbErr> {
        let Some(classroom_id) = classroom_id else {
            return Ok(false);
        };

        let count = student_attendance::Entity::find()
            .filter(student_attendance::Column::ClassroomId.eq(classroom_id))
            .filter(student_attendance::Column::Date.eq(date))
            .filter(student_attendance::Column::MarkedByTeacher.eq(true))
            .count(self.conn)
            .await?;

        Ok(count > 0)
    }

    /// Students enrolled in the classroom, ordered by roll number.
    /// A teacher without a classroom has an empty roster.
    pub async fn class_roster(&self, classroom_id: Option<i32>) -> Result<Vec<RosterEntry>, DbErr> {
        let Some(classroom_id) = classroom_id else {
            return Ok(Vec::new());
        };

        let rows = student::Entity::find()
            .filter(student::Column::ClassroomId.eq(classroom_id))
            .find_also_related(user::Entity)
            .order_by_asc(student::Column::RollNumber)
            .all(self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(s, u)| RosterEntry {
                username: u.map(|u| u.username).unwrap_or_default(),
                student: s,
            })
            .collect())
    }

    /// Record the class roll for `today`.
    ///
    /// Every student on the teacher's roster gets exactly one row for the
    /// date: present if their id is in `present_ids`, absent otherwise.
    /// Existing rows are overwritten, so resubmitting yields the latest
    /// selection. Ids not on the roster are ignored.
    ///
    /// Returns the number of students recorded.
    pub async fn record_roll_call(
        &self,
        teacher: &teacher::Model,
        today: NaiveDate,
        present_ids: &HashSet<i32>,
    ) -> Result<usize, DbErr> {
        let Some(classroom_id) = teacher.classroom_id else {
            return Ok(0);
        };

        let roster = self.class_roster(Some(classroom_id)).await?;
        if roster.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let mut present_count = 0usize;
        let rows: Vec<student_attendance::ActiveModel> = roster
            .iter()
            .map(|entry| {
                let present = present_ids.contains(&entry.student.id);
                if present {
                    present_count += 1;
                }
                student_attendance::ActiveModel {
                    student_id: Set(entry.student.id),
                    classroom_id: Set(classroom_id),
                    date: Set(today),
                    present: Set(present),
                    marked_by_teacher: Set(true),
                    created_at: Set(now),
                    ..Default::default()
                }
            })
            .collect();

        student_attendance::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::columns([
                    student_attendance::Column::StudentId,
                    student_attendance::Column::Date,
                ])
                .update_columns([
                    student_attendance::Column::Present,
                    student_attendance::Column::MarkedByTeacher,
                    student_attendance::Column::ClassroomId,
                ])
                .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await?;

        info!(
            teacher_id = teacher.id,
            classroom_id,
            %today,
            students = roster.len(),
            present = present_count,
            "Roll call recorded"
        );

        Ok(roster.len())
    }

    pub async fn student_summary(&self, student: &student::Model) -> Result<StudentSummary, DbErr> {
        let records = student_attendance::Entity::find()
            .filter(student_attendance::Column::StudentId.eq(student.id))
            .order_by_desc(student_attendance::Column::Date)
            .order_by_desc(student_attendance::Column::Id)
            .all(self.conn)
            .await?;

        let total_days = records.len() as u64;
        let present_days = records.iter().filter(|r| r.present).count() as u64;

        Ok(StudentSummary {
            percentage: attendance_percentage(present_days, total_days),
            records,
            total_days,
            present_days,
        })
    }

    /// Store a complaint dated `today`. The message must already be validated.
    pub async fn file_complaint(
        &self,
        student: &student::Model,
        today: NaiveDate,
        message: String,
    ) -> Result<complaint::Model, DbErr> {
        let model = complaint::ActiveModel {
            student_id: Set(student.id),
            date: Set(today),
            message: Set(message),
            resolved: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let saved = model.insert(self.conn).await?;
        info!(student_id = student.id, complaint_id = saved.id, "Complaint filed");
        Ok(saved)
    }

    /// The student's own complaints, newest first.
    pub async fn student_complaints(
        &self,
        student: &student::Model,
    ) -> Result<Vec<complaint::Model>, DbErr> {
        complaint::Entity::find()
            .filter(complaint::Column::StudentId.eq(student.id))
            .order_by_desc(complaint::Column::CreatedAt)
            .order_by_desc(complaint::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn admin_overview(&self, today: NaiveDate) -> Result<AdminOverview, DbErr> {
        let total_students = student::Entity::find().count(self.conn).await?;
        let total_teachers = teacher::Entity::find().count(self.conn).await?;

        let teachers_checked_in_today = teacher_attendance::Entity::find()
            .filter(teacher_attendance::Column::Date.eq(today))
            .filter(teacher_attendance::Column::Present.eq(true))
            .count(self.conn)
            .await?;

        let marked_classrooms: Vec<i32> = student_attendance::Entity::find()
            .select_only()
            .column(student_attendance::Column::ClassroomId)
            .distinct()
            .filter(student_attendance::Column::Date.eq(today))
            .filter(student_attendance::Column::MarkedByTeacher.eq(true))
            .into_tuple()
            .all(self.conn)
            .await?;

        Ok(AdminOverview {
            total_students,
            total_teachers,
            teachers_checked_in_today,
            classes_marked_today: marked_classrooms.len() as u64,
            recent_complaints: self.recent_complaints().await?,
        })
    }

    async fn recent_complaints(&self) -> Result<Vec<RecentComplaint>, DbErr> {
        let rows = complaint::Entity::find()
            .find_also_related(student::Entity)
            .order_by_desc(complaint::Column::CreatedAt)
            .order_by_desc(complaint::Column::Id)
            .limit(Some(RECENT_COMPLAINTS_LIMIT))
            .all(self.conn)
            .await?;

        let user_ids: Vec<i32> = rows
            .iter()
            .filter_map(|(_, s)| s.as_ref().map(|s| s.user_id))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let usernames: HashMap<i32, String> = if user_ids.is_empty() {
            HashMap::new()
        } else {
            user::Entity::find()
                .filter(user::Column::Id.is_in(user_ids))
                .all(self.conn)
                .await?
                .into_iter()
                .map(|u| (u.id, u.username))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|(c, s)| {
                let (username, roll_number) = s
                    .map(|s| {
                        let name = usernames.get(&s.user_id).cloned().unwrap_or_default();
                        (name, s.roll_number)
                    })
                    .unwrap_or_default();
                RecentComplaint {
                    complaint: c,
                    username,
                    roll_number,
                }
            })
            .collect())
    }
}
