//! Workflow tests against `AttendanceService` with fixed dates.

use std::collections::HashSet;

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use attendance_server::attendance::AttendanceService;
use attendance_server::entity::{classroom, student, student_attendance, teacher, teacher_attendance};
use attendance_server::provision;

use crate::common::{PASSWORD, fresh_db};

fn may(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

struct School {
    db: DatabaseConnection,
    room: classroom::Model,
    t1: teacher::Model,
    s1: student::Model,
    s2: student::Model,
}

/// Teacher "T1" with classroom "10A" holding students "S1" and "S2".
async fn school() -> School {
    let (db, _) = fresh_db().await;
    let room = provision::create_classroom(&db, "10A").await.unwrap();

    let u = provision::create_user(&db, "T1", PASSWORD, false).await.unwrap();
    let t1 = provision::create_teacher(&db, u.id, "Physics", Some(room.id))
        .await
        .unwrap();

    let u = provision::create_user(&db, "S1", PASSWORD, false).await.unwrap();
    let s1 = provision::create_student(&db, u.id, "1", room.id).await.unwrap();
    let u = provision::create_user(&db, "S2", PASSWORD, false).await.unwrap();
    let s2 = provision::create_student(&db, u.id, "2", room.id).await.unwrap();

    School { db, room, t1, s1, s2 }
}

async fn row_for(
    db: &DatabaseConnection,
    student_id: i32,
    day: NaiveDate,
) -> Vec<student_attendance::Model> {
    student_attendance::Entity::find()
        .filter(student_attendance::Column::StudentId.eq(student_id))
        .filter(student_attendance::Column::Date.eq(day))
        .all(db)
        .await
        .unwrap()
}

#[tokio::test]
async fn check_in_and_roll_call_end_to_end() {
    let s = school().await;
    let service = AttendanceService::new(&s.db);

    let (checkin, created) = service.check_in(&s.t1, may(1)).await.unwrap();
    assert!(created);
    assert!(checkin.present);
    assert_eq!(checkin.teacher_id, s.t1.id);
    assert_eq!(checkin.classroom_id, Some(s.room.id));
    assert_eq!(checkin.date, may(1));
    assert!(!service.class_marked_on(s.t1.classroom_id, may(1)).await.unwrap());

    let written = service
        .record_roll_call(&s.t1, may(1), &HashSet::from([s.s1.id]))
        .await
        .unwrap();
    assert_eq!(written, 2);

    let s1_rows = row_for(&s.db, s.s1.id, may(1)).await;
    let s2_rows = row_for(&s.db, s.s2.id, may(1)).await;
    assert_eq!(s1_rows.len(), 1);
    assert_eq!(s2_rows.len(), 1);
    assert!(s1_rows[0].present && s1_rows[0].marked_by_teacher);
    assert!(!s2_rows[0].present && s2_rows[0].marked_by_teacher);

    assert!(service.class_marked_on(s.t1.classroom_id, may(1)).await.unwrap());
    assert!(!service.class_marked_on(s.t1.classroom_id, may(2)).await.unwrap());
}

#[tokio::test]
async fn second_check_in_same_day_changes_nothing() {
    let s = school().await;
    let service = AttendanceService::new(&s.db);

    let (first, created_first) = service.check_in(&s.t1, may(1)).await.unwrap();
    let (second, created_second) = service.check_in(&s.t1, may(1)).await.unwrap();

    assert!(created_first);
    assert!(!created_second);
    assert_eq!(first, second);

    let (next_day, created_next) = service.check_in(&s.t1, may(2)).await.unwrap();
    assert!(created_next);
    assert_ne!(next_day.id, first.id);

    let rows = teacher_attendance::Entity::find()
        .filter(teacher_attendance::Column::TeacherId.eq(s.t1.id))
        .count(&s.db)
        .await
        .unwrap();
    assert_eq!(rows, 2);
}

#[tokio::test]
async fn concurrent_check_ins_produce_one_row() {
    let s = school().await;
    let a = AttendanceService::new(&s.db);
    let b = AttendanceService::new(&s.db);

    let (ra, rb) = tokio::join!(a.check_in(&s.t1, may(1)), b.check_in(&s.t1, may(1)));
    let (ra, created_a) = ra.unwrap();
    let (rb, created_b) = rb.unwrap();

    assert_eq!(ra.id, rb.id);
    assert!(created_a ^ created_b);
    let rows = teacher_attendance::Entity::find().count(&s.db).await.unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn resubmitted_roll_reflects_latest_selection() {
    let s = school().await;
    let service = AttendanceService::new(&s.db);

    service
        .record_roll_call(&s.t1, may(1), &HashSet::from([s.s1.id]))
        .await
        .unwrap();
    service
        .record_roll_call(&s.t1, may(1), &HashSet::from([s.s2.id]))
        .await
        .unwrap();

    let total = student_attendance::Entity::find().count(&s.db).await.unwrap();
    assert_eq!(total, 2);
    assert!(!row_for(&s.db, s.s1.id, may(1)).await[0].present);
    assert!(row_for(&s.db, s.s2.id, may(1)).await[0].present);
}

#[tokio::test]
async fn roll_call_overwrites_unmarked_row_and_forces_teacher_flag() {
    let s = school().await;
    let service = AttendanceService::new(&s.db);
    let other = provision::create_classroom(&s.db, "10B").await.unwrap();

    student_attendance::ActiveModel {
        student_id: Set(s.s1.id),
        classroom_id: Set(other.id),
        date: Set(may(1)),
        present: Set(true),
        marked_by_teacher: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&s.db)
    .await
    .unwrap();

    service
        .record_roll_call(&s.t1, may(1), &HashSet::new())
        .await
        .unwrap();

    let rows = row_for(&s.db, s.s1.id, may(1)).await;
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].present);
    assert!(rows[0].marked_by_teacher);
    assert_eq!(rows[0].classroom_id, s.room.id);
}

#[tokio::test]
async fn summary_counts_and_percentage() {
    let s = school().await;
    let service = AttendanceService::new(&s.db);

    let empty = service.student_summary(&s.s1).await.unwrap();
    assert_eq!(empty.total_days, 0);
    assert_eq!(empty.percentage, 0.0);

    for (d, present) in [(1, true), (2, true), (3, false), (6, true)] {
        let ids = if present {
            HashSet::from([s.s1.id])
        } else {
            HashSet::new()
        };
        service.record_roll_call(&s.t1, may(d), &ids).await.unwrap();
    }

    let summary = service.student_summary(&s.s1).await.unwrap();
    assert_eq!(summary.total_days, 4);
    assert_eq!(summary.present_days, 3);
    assert_eq!(summary.percentage, 75.0);
    assert_eq!(summary.records[0].date, may(6));
    assert_eq!(summary.records[3].date, may(1));
}

#[tokio::test]
async fn admin_overview_counts_distinct_marked_classrooms() {
    let s = school().await;
    let service = AttendanceService::new(&s.db);

    // A second teacher for the same classroom re-marks it.
    let u = provision::create_user(&s.db, "T2", PASSWORD, false).await.unwrap();
    let t2 = provision::create_teacher(&s.db, u.id, "Chemistry", Some(s.room.id))
        .await
        .unwrap();

    service.check_in(&s.t1, may(1)).await.unwrap();
    service.check_in(&t2, may(2)).await.unwrap();
    service.record_roll_call(&s.t1, may(1), &HashSet::new()).await.unwrap();
    service.record_roll_call(&t2, may(1), &HashSet::new()).await.unwrap();
    service
        .file_complaint(&s.s1, may(1), "Too cold".into())
        .await
        .unwrap();

    let overview = service.admin_overview(may(1)).await.unwrap();
    assert_eq!(overview.total_students, 2);
    assert_eq!(overview.total_teachers, 2);
    assert_eq!(overview.teachers_checked_in_today, 1);
    assert_eq!(overview.classes_marked_today, 1);
    assert_eq!(overview.recent_complaints.len(), 1);
    assert_eq!(overview.recent_complaints[0].username, "S1");

    let other_day = service.admin_overview(may(3)).await.unwrap();
    assert_eq!(other_day.teachers_checked_in_today, 0);
    assert_eq!(other_day.classes_marked_today, 0);
}

#[tokio::test]
async fn provisioning_rejects_duplicates() {
    let s = school().await;

    let err = provision::create_classroom(&s.db, "10A").await.unwrap_err();
    assert!(matches!(err, provision::ProvisionError::Duplicate(_)));

    let u = provision::create_user(&s.db, "S3", PASSWORD, false).await.unwrap();
    let err = provision::create_student(&s.db, u.id, "1", s.room.id)
        .await
        .unwrap_err();
    assert!(matches!(err, provision::ProvisionError::Duplicate("Roll number")));

    let err = provision::create_user(&s.db, "S1", PASSWORD, false)
        .await
        .unwrap_err();
    assert!(matches!(err, provision::ProvisionError::Duplicate("Username")));
}
